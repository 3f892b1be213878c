//! Validation of `create` arguments.

use std::path::PathBuf;

use thiserror::Error;

use barkit::{OutputKind, RasterFormat, Symbology};

use crate::args::CreateArgs;

/// A `create` argument names something barkit does not know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown type {0}. Try list action for available types.")]
    UnknownType(String),

    #[error("Unknown barcode {0}. Try list action for available barcodes.")]
    UnknownBarcode(String),
}

/// A validated `create` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub symbology: Symbology,
    pub code: String,
    pub output: PathBuf,
    pub kind: OutputKind,
}

impl CreateRequest {
    /// Normalizes and validates raw `create` arguments.
    ///
    /// The output type is matched case-insensitively against `SVG` and the
    /// raster formats, the barcode case-insensitively against the symbology
    /// identifiers. The type is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the normalized offending value.
    pub fn from_args(args: &CreateArgs) -> Result<Self, ValidationError> {
        let output_type = args.output_type.to_uppercase();
        let kind = if output_type == "SVG" {
            OutputKind::Vector {
                compress: args.compress,
            }
        } else {
            let format = output_type
                .parse::<RasterFormat>()
                .map_err(|_| ValidationError::UnknownType(output_type.clone()))?;
            OutputKind::Raster { format }
        };

        let barcode = args.barcode.to_lowercase();
        let symbology = barcode
            .parse::<Symbology>()
            .map_err(|_| ValidationError::UnknownBarcode(barcode.clone()))?;

        Ok(Self {
            symbology,
            code: args.code.clone(),
            output: args.output.clone(),
            kind,
        })
    }
}
