//! Error type of the barkit CLI.

use thiserror::Error;

use barkit::BarkitError;

use crate::config::ConfigError;

/// Anything that ends a CLI run unsuccessfully.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command line was well-formed but names something unknown.
    /// Reported by clap, exit code 2.
    #[error(transparent)]
    Usage(clap::Error),

    #[error(transparent)]
    Barkit(#[from] BarkitError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Barkit(BarkitError::Io(err))
    }
}
