//! Error types for barkit operations.
//!
//! This module provides the main error type [`BarkitError`] which wraps
//! the error conditions that can occur while encoding, rendering and
//! writing a barcode, plus the narrower [`EncodeError`] and [`RenderError`]
//! produced by the symbology registry and the writers.

use std::io;

use thiserror::Error;

use crate::symbology::Symbology;

/// The main error type for barkit operations.
#[derive(Debug, Error)]
pub enum BarkitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Raster output is not available in this build")]
    RasterUnavailable,
}

/// The payload cannot be represented in the requested symbology.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{symbology}: invalid length {found}, expected {expected}")]
    InvalidLength {
        symbology: Symbology,
        found: usize,
        expected: &'static str,
    },

    #[error("{symbology}: invalid character {found:?}")]
    InvalidCharacter { symbology: Symbology, found: char },

    #[error("{symbology}: check digit {found} does not match computed {expected}")]
    InvalidChecksum {
        symbology: Symbology,
        found: char,
        expected: char,
    },

    #[error("{symbology}: code must start with {expected}")]
    InvalidPrefix {
        symbology: Symbology,
        expected: &'static str,
    },

    #[error("{symbology}: {message}")]
    Backend {
        symbology: Symbology,
        message: String,
    },
}

impl EncodeError {
    /// Returns the symbology the payload was rejected by.
    pub fn symbology(&self) -> Symbology {
        match self {
            Self::InvalidLength { symbology, .. }
            | Self::InvalidCharacter { symbology, .. }
            | Self::InvalidChecksum { symbology, .. }
            | Self::InvalidPrefix { symbology, .. }
            | Self::Backend { symbology, .. } => *symbology,
        }
    }
}

/// A writer could not turn an encoded barcode into output bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{writer} writer cannot produce {requested} output")]
    UnsupportedOutput {
        writer: &'static str,
        requested: String,
    },

    #[error("Barcode has no modules to draw")]
    Empty,

    #[error("Image dimensions {width}x{height} exceed the {format} limit")]
    TooLarge {
        format: &'static str,
        width: u32,
        height: u32,
    },

    #[error("Image encoding failed: {0}")]
    Image(String),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] io::Error),
}
