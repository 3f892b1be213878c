//! Raster output.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::debug;

use super::{
    Rendered, Writer,
    bitmap::{self, Bitmap},
    unsupported,
};
use crate::{
    config::Style,
    error::RenderError,
    layout::{self, RasterGeometry},
    output::{OutputKind, RasterFormat},
    symbology::Barcode,
};

/// Writes barcodes as raster images.
///
/// Bars span the full image height; no human readable text is drawn.
#[derive(Debug, Clone, Default)]
pub struct ImageWriter {
    style: Style,
}

impl ImageWriter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Draws `barcode` into an RGB pixel buffer.
    pub fn image(&self, barcode: &Barcode) -> Result<RgbImage, RenderError> {
        let modules = barcode.modules();
        if modules.is_empty() {
            return Err(RenderError::Empty);
        }

        let geometry = RasterGeometry::new(&self.style, modules.len())?;
        debug!(width = geometry.width, height = geometry.height; "Raster dimensions");

        let mut img = RgbImage::from_pixel(
            geometry.width,
            geometry.height,
            Rgb(self.style.background().to_rgb8()),
        );
        let foreground = Rgb(self.style.foreground().to_rgb8());

        for bar in layout::bars(modules) {
            for x in geometry.bar_span(&bar) {
                for y in 0..geometry.height {
                    img.put_pixel(x, y, foreground);
                }
            }
        }

        Ok(img)
    }

    /// Reduces the drawing to dark/light pixels for the one-bit formats.
    fn bitmap(&self, img: &RgbImage) -> Bitmap {
        // Bars are dark unless the configured foreground is the lighter color.
        let inverted = self.style.foreground().luminance() > self.style.background().luminance();
        let foreground = Rgb(self.style.foreground().to_rgb8());
        Bitmap::new(img.width(), img.height(), |x, y| {
            (*img.get_pixel(x, y) == foreground) != inverted
        })
    }

    fn encode(&self, img: RgbImage, format: RasterFormat) -> Result<Vec<u8>, RenderError> {
        let image_format = match format {
            RasterFormat::Bmp => ImageFormat::Bmp,
            RasterFormat::Gif => ImageFormat::Gif,
            RasterFormat::Jpeg => ImageFormat::Jpeg,
            RasterFormat::Png => ImageFormat::Png,
            RasterFormat::Tiff => ImageFormat::Tiff,
            RasterFormat::Xbm => return Ok(bitmap::xbm(&self.bitmap(&img))),
            RasterFormat::Msp => return bitmap::msp(&self.bitmap(&img)),
            RasterFormat::Pcx => return bitmap::pcx(&self.bitmap(&img), self.style.dpi()),
        };

        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, image_format)
            .map_err(|err| RenderError::Image(err.to_string()))?;

        Ok(buffer.into_inner())
    }
}

impl Writer for ImageWriter {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn render(&self, barcode: &Barcode, kind: &OutputKind) -> Result<Rendered, RenderError> {
        let OutputKind::Raster { format } = *kind else {
            return Err(unsupported(self.name(), kind));
        };

        let img = self.image(barcode)?;
        let bytes = self.encode(img, format)?;
        debug!(format:% = format, bytes = bytes.len(); "Image encoded");

        Ok(Rendered::new(bytes, format.extension()))
    }
}
