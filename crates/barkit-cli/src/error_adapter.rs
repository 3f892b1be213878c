//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! This module provides the bridge between the standard error types of the
//! library and CLI and miette's rich diagnostic formatting.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use barkit::{BarkitError, RenderError};

use crate::error::CliError;

/// Adapter rendering a [`CliError`] as a miette diagnostic.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Usage(_) => return None,
            CliError::Config(_) => "barkit::config",
            CliError::Barkit(err) => match err {
                BarkitError::Io(_) => "barkit::io",
                BarkitError::Encode(_) => "barkit::encode",
                BarkitError::Render(_) => "barkit::render",
                BarkitError::Config(_) => "barkit::config",
                BarkitError::RasterUnavailable => "barkit::raster",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: Box<dyn fmt::Display + 'a> = match self.0 {
            CliError::Usage(_) => return None,
            CliError::Config(_) => Box::new("check the file given with --config"),
            CliError::Barkit(err) => match err {
                BarkitError::Io(_) => Box::new("check that the output directory exists and is writable"),
                BarkitError::Encode(encode) => Box::new(format!(
                    "the code is not valid for the {} barcode",
                    encode.symbology()
                )),
                BarkitError::Render(RenderError::TooLarge { .. }) => {
                    Box::new("use a smaller module_width or dpi in the configuration")
                }
                BarkitError::Render(_) => return None,
                BarkitError::Config(_) => Box::new("check the [style] section of the configuration"),
                BarkitError::RasterUnavailable => Box::new("use --type svg"),
            },
        };
        Some(help)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
