//! Rendering backends.
//!
//! A [`Writer`] turns an encoded [`Barcode`] into the bytes of one output
//! file. Two writers exist: [`SvgWriter`] for vector output (optionally gzip
//! compressed) and, with the `raster` feature, [`ImageWriter`] for the
//! pixel formats listed in [`RasterFormat`](crate::RasterFormat).

#[cfg(feature = "raster")]
mod bitmap;
#[cfg(feature = "raster")]
mod image;
mod svg;

#[cfg(feature = "raster")]
pub use self::image::ImageWriter;
pub use self::svg::SvgWriter;

use log::debug;

use crate::{
    config::Style,
    error::{BarkitError, RenderError},
    output::OutputKind,
    symbology::Barcode,
};

/// The rendered content of one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    bytes: Vec<u8>,
    extension: &'static str,
}

impl Rendered {
    pub fn new(bytes: Vec<u8>, extension: &'static str) -> Self {
        Self { bytes, extension }
    }

    /// The file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File extension (without dot) matching the content.
    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A rendering backend.
pub trait Writer {
    /// Short name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Renders `barcode` as the given output kind.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedOutput`] when this writer does not
    /// produce `kind`, or another [`RenderError`] if encoding the output
    /// fails.
    fn render(&self, barcode: &Barcode, kind: &OutputKind) -> Result<Rendered, RenderError>;
}

/// Returns the writer able to produce `kind`, drawing with `style`.
///
/// # Errors
///
/// Returns [`BarkitError::RasterUnavailable`] for raster output when the
/// crate was built without the `raster` feature.
pub fn for_output(kind: &OutputKind, style: Style) -> Result<Box<dyn Writer>, BarkitError> {
    debug!(kind:% = kind; "Selecting writer");
    match kind {
        OutputKind::Vector { .. } => Ok(Box::new(SvgWriter::new(style))),
        #[cfg(feature = "raster")]
        OutputKind::Raster { .. } => Ok(Box::new(ImageWriter::new(style))),
        #[cfg(not(feature = "raster"))]
        OutputKind::Raster { .. } => Err(BarkitError::RasterUnavailable),
    }
}

fn unsupported(writer: &'static str, kind: &OutputKind) -> RenderError {
    RenderError::UnsupportedOutput {
        writer,
        requested: kind.to_string(),
    }
}
