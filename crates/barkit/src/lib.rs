//! barkit - barcode generation.
//!
//! Encodes a payload in one of the supported [`Symbology`] variants, renders
//! it through a [`Writer`](writer::Writer) and writes exactly one file.
//! Bar patterns come from the [`barcoders`] crate; this crate provides the
//! symbology registry, the layout and the SVG and raster writers.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use barkit::{OutputKind, Symbology, config::Style, writer::SvgWriter};
//!
//! let writer = SvgWriter::new(Style::default());
//! let path = barkit::generate(
//!     Symbology::Code39,
//!     "HELLO",
//!     &writer,
//!     Path::new("hello"),
//!     &OutputKind::Vector { compress: false },
//! )
//! .expect("Failed to generate barcode");
//!
//! assert_eq!(path, Path::new("hello.svg"));
//! ```

pub mod color;
pub mod config;
pub mod layout;
pub mod writer;

mod error;
mod output;
mod symbology;

pub use error::{BarkitError, EncodeError, RenderError};
pub use output::{OutputKind, RasterFormat};
pub use symbology::{Barcode, Symbology, UnknownSymbology};

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use writer::Writer;

/// Whether this build can write raster images.
///
/// Raster output is the `raster` cargo feature; without it only SVG output
/// is available.
pub fn raster_available() -> bool {
    cfg!(feature = "raster")
}

/// Encodes `code`, renders it with `writer` and writes the result.
///
/// `output` is the destination without extension; the writer's extension
/// (`svg`, `svgz`, `png`, ...) is appended. Nothing is written unless
/// encoding and rendering both succeed.
///
/// Returns the path of the written file.
///
/// # Errors
///
/// Returns [`BarkitError::Encode`] if the payload is invalid for the
/// symbology, [`BarkitError::Render`] if the writer cannot produce `kind`,
/// and [`BarkitError::Io`] if the file cannot be written.
pub fn generate(
    symbology: Symbology,
    code: &str,
    writer: &dyn Writer,
    output: &Path,
    kind: &OutputKind,
) -> Result<PathBuf, BarkitError> {
    info!(symbology = symbology.name(), code, writer = writer.name(); "Generating barcode");

    let barcode = symbology.encode(code)?;
    debug!(text = barcode.text(), modules = barcode.modules().len(); "Barcode encoded");

    let rendered = writer.render(&barcode, kind)?;

    let path = with_extension(output, rendered.extension());
    fs::write(&path, rendered.bytes())?;

    info!(path:? = path, bytes = rendered.bytes().len(); "Barcode written");

    Ok(path)
}

/// Appends `.extension` without replacing an existing one, so `label.v2`
/// becomes `label.v2.svg`.
fn with_extension(output: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}
