//! SVG output.

use std::io::Write as _;

use flate2::{Compression, write::GzEncoder};
use log::debug;
use svg::{
    Document,
    node::element::{Group, Rectangle, Text},
};

use super::{Rendered, Writer, unsupported};
use crate::{
    config::Style,
    error::RenderError,
    layout::{self, VectorGeometry},
    output::OutputKind,
    symbology::Barcode,
};

/// Writes barcodes as SVG documents sized in millimetres.
#[derive(Debug, Clone, Default)]
pub struct SvgWriter {
    style: Style,
}

impl SvgWriter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Builds the SVG document for `barcode`.
    pub fn document(&self, barcode: &Barcode) -> Result<Document, RenderError> {
        let modules = barcode.modules();
        if modules.is_empty() {
            return Err(RenderError::Empty);
        }

        let geometry = VectorGeometry::new(&self.style, modules.len());
        debug!(width = geometry.width, height = geometry.height; "SVG dimensions");

        let background = Rectangle::new()
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", &self.style.background());

        let mut bars = Group::new()
            .set("id", "barcode_group")
            .set("fill", &self.style.foreground());
        for bar in layout::bars(modules) {
            bars = bars.add(
                Rectangle::new()
                    .set("x", geometry.module_x(bar.start))
                    .set("y", 0)
                    .set("width", geometry.module_width * bar.width as f32)
                    .set("height", geometry.bar_height),
            );
        }

        let mut document = Document::new()
            .set("width", format!("{}mm", geometry.width))
            .set("height", format!("{}mm", geometry.height))
            .set("viewBox", (0.0_f32, 0.0_f32, geometry.width, geometry.height))
            .add(background)
            .add(bars);

        if self.style.show_text() {
            let text = Text::new(barcode.text())
                .set("x", geometry.width / 2.0)
                .set("y", geometry.text_baseline)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", geometry.font_size)
                .set("fill", &self.style.foreground());
            document = document.add(text);
        }

        Ok(document)
    }
}

impl Writer for SvgWriter {
    fn name(&self) -> &'static str {
        "SVG"
    }

    fn render(&self, barcode: &Barcode, kind: &OutputKind) -> Result<Rendered, RenderError> {
        let OutputKind::Vector { compress } = *kind else {
            return Err(unsupported(self.name(), kind));
        };

        let content = self.document(barcode)?.to_string();

        if !compress {
            return Ok(Rendered::new(content.into_bytes(), "svg"));
        }

        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(content.as_bytes())?;
        let bytes = encoder.finish()?;
        debug!(plain = content.len(), compressed = bytes.len(); "SVG compressed");

        Ok(Rendered::new(bytes, "svgz"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use flate2::read::GzDecoder;

    use super::*;
    use crate::{config::AppConfig, symbology::Symbology};

    fn code39() -> Barcode {
        Symbology::Code39.encode("123456789012").unwrap()
    }

    #[test]
    fn test_plain_svg() {
        let rendered = SvgWriter::default()
            .render(&code39(), &OutputKind::Vector { compress: false })
            .unwrap();

        assert_eq!(rendered.extension(), "svg");
        let svg = String::from_utf8(rendered.into_bytes()).unwrap();
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");
        assert!(svg.contains("123456789012"));
    }

    #[test]
    fn test_one_rect_per_bar_plus_background() {
        let barcode = code39();
        let svg = SvgWriter::default().document(&barcode).unwrap().to_string();

        let rects = svg.matches("<rect").count();
        assert_eq!(rects, layout::bars(barcode.modules()).len() + 1);
    }

    #[test]
    fn test_compressed_svg_round_trips() {
        let rendered = SvgWriter::default()
            .render(&code39(), &OutputKind::Vector { compress: true })
            .unwrap();
        assert_eq!(rendered.extension(), "svgz");

        let mut decoded = String::new();
        GzDecoder::new(rendered.bytes())
            .read_to_string(&mut decoded)
            .unwrap();

        let plain = SvgWriter::default().document(&code39()).unwrap().to_string();
        assert_eq!(decoded, plain);
    }

    #[test]
    fn test_text_can_be_hidden() {
        let config: AppConfig = toml::from_str("[style]\nshow_text = false\n").unwrap();
        let writer = SvgWriter::new(config.style().resolve().unwrap());
        let svg = writer.document(&code39()).unwrap().to_string();
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_rejects_raster_output() {
        let kind = OutputKind::Raster {
            format: crate::RasterFormat::Png,
        };
        let err = SvgWriter::default().render(&code39(), &kind).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedOutput { writer: "SVG", .. }));
    }
}
