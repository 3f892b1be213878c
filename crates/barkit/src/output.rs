//! Output kinds understood by the writers.

use std::{fmt, str::FromStr};

/// The raster image formats a barcode can be written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    Bmp,
    Gif,
    Jpeg,
    Msp,
    Pcx,
    Png,
    Tiff,
    Xbm,
}

impl RasterFormat {
    /// Every supported raster format, in listing order.
    pub const ALL: [RasterFormat; 8] = [
        Self::Bmp,
        Self::Gif,
        Self::Jpeg,
        Self::Msp,
        Self::Pcx,
        Self::Png,
        Self::Tiff,
        Self::Xbm,
    ];

    /// Returns the uppercase format name, e.g. `PNG`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bmp => "BMP",
            Self::Gif => "GIF",
            Self::Jpeg => "JPEG",
            Self::Msp => "MSP",
            Self::Pcx => "PCX",
            Self::Png => "PNG",
            Self::Tiff => "TIFF",
            Self::Xbm => "XBM",
        }
    }

    /// Returns the file extension (without dot) used for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Msp => "msp",
            Self::Pcx => "pcx",
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::Xbm => "xbm",
        }
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RasterFormat {
    type Err = String;

    /// Matches the uppercase format name exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == s)
            .ok_or_else(|| format!("unknown raster format `{s}`"))
    }
}

/// What a writer is asked to produce.
///
/// Raster writers carry the target image format, the vector (SVG) writer
/// carries whether its output is gzip compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Raster { format: RasterFormat },
    Vector { compress: bool },
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster { format } => write!(f, "{format}"),
            Self::Vector { compress: false } => f.write_str("SVG"),
            Self::Vector { compress: true } => f.write_str("SVGZ"),
        }
    }
}
