//! CLI logic for the barkit barcode generator.
//!
//! [`run`] dispatches a parsed [`Args`] to the `list` or `create` action.
//! Output meant for the user goes to the supplied writer; diagnostics go
//! through the `log` facade.

pub mod error_adapter;

mod args;
mod capabilities;
mod config;
mod create;
mod error;
mod list;
mod request;

pub use args::{Action, Args, CreateArgs};
pub use capabilities::Capabilities;
pub use config::ConfigError;
pub use error::CliError;
pub use request::{CreateRequest, ValidationError};

use std::io::Write;

use log::info;

/// Run the barkit CLI application
///
/// # Errors
///
/// Returns [`CliError::Usage`] when `create` names an unknown barcode or
/// output type, [`CliError::Config`] when the configuration file cannot be
/// loaded, and [`CliError::Barkit`] for invalid styles, invalid codes and
/// rendering or I/O failures.
pub fn run(args: &Args, capabilities: Capabilities, out: &mut impl Write) -> Result<(), CliError> {
    match &args.action {
        Action::List => {
            info!(raster = capabilities.raster(); "Listing formats");
            list::run(capabilities, out)?;
        }
        Action::Create(create_args) => {
            let request = CreateRequest::from_args(create_args)
                .map_err(|err| CliError::Usage(args::usage_error(capabilities, err)))?;
            info!(
                barcode = request.symbology.name(),
                kind = request.kind.to_string();
                "Creating barcode"
            );

            let app_config = config::load_config(args.config.as_ref())?;
            let style = app_config.style().resolve()?;

            create::run(&request, style, out)?;
        }
    }

    Ok(())
}
