//! Command-line argument definitions for the barkit CLI.
//!
//! The parser is assembled with [`clap`]'s builder API because its shape
//! depends on [`Capabilities`]: the `--type` option of `create` only exists
//! when raster output is available. Parsing yields a typed [`Args`].

use std::{ffi::OsString, fmt, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, crate_description, crate_version, error::ErrorKind, value_parser};

use crate::capabilities::Capabilities;

/// Symbology used when `--barcode` is not given.
pub const DEFAULT_BARCODE: &str = "code39";

/// Output type used when `--type` is not given (or not available).
pub const DEFAULT_TYPE: &str = "svg";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// Path to configuration file (TOML)
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    pub log_level: String,

    pub action: Action,
}

/// The action selected by the subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print the supported barcodes and image formats.
    List,
    /// Encode a code and write it to a file.
    Create(CreateArgs),
}

/// Raw `create` arguments, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateArgs {
    pub code: String,
    pub output: PathBuf,
    pub compress: bool,
    pub barcode: String,
    pub output_type: String,
}

impl Args {
    /// Parses the process arguments, exiting with a usage message on error.
    pub fn parse(capabilities: Capabilities) -> Self {
        Self::try_parse_from(capabilities, std::env::args_os()).unwrap_or_else(|err| err.exit())
    }

    /// Parses `itr` as a command line, the first item being the program name.
    ///
    /// # Errors
    ///
    /// Returns a [`clap::Error`] for unknown arguments, missing positionals,
    /// a missing action, and for `--help`/`--version` (which clap reports
    /// as errors of kind `DisplayHelp`/`DisplayVersion`).
    pub fn try_parse_from<I, T>(capabilities: Capabilities, itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command(capabilities).try_get_matches_from(itr)?;
        Ok(Self::from_matches(&matches))
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let action = match matches.subcommand() {
            Some(("create", sub)) => Action::Create(CreateArgs {
                code: string(sub, "code"),
                output: sub.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
                compress: sub.get_flag("compress"),
                barcode: string(sub, "barcode"),
                output_type: sub
                    .try_get_one::<String>("type")
                    .ok()
                    .flatten()
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            }),
            _ => Action::List,
        };

        Self {
            config: matches.get_one::<PathBuf>("config").cloned(),
            log_level: string(matches, "log-level"),
            action,
        }
    }
}

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

/// Builds the argument parser for the given capabilities.
pub fn command(capabilities: Capabilities) -> Command {
    let epilog = if capabilities.raster() {
        "Image output enabled, use --type option to give image format (png, jpeg, ...)."
    } else {
        "Image output disabled, --type option disabled."
    };

    let mut create = Command::new("create")
        .about("Create a barcode with the given options.")
        .arg(
            Arg::new("code")
                .required(true)
                .help("Code to render as barcode."),
        )
        .arg(
            Arg::new("output")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Filename for output without extension, e.g. mybarcode."),
        )
        .arg(
            Arg::new("compress")
                .short('c')
                .long("compress")
                .action(ArgAction::SetTrue)
                .help("Compress output, only recognized if type is svg."),
        )
        .arg(
            Arg::new("barcode")
                .short('b')
                .long("barcode")
                .value_name("NAME")
                .default_value(DEFAULT_BARCODE)
                .help("Barcode to use."),
        );

    if capabilities.raster() {
        create = create.arg(
            Arg::new("type")
                .short('t')
                .long("type")
                .value_name("TYPE")
                .default_value(DEFAULT_TYPE)
                .help("Type of output."),
        );
    }

    Command::new("barkit")
        .version(crate_version!())
        .about(crate_description!())
        .after_help(epilog)
        .disable_version_flag(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Print version"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Path to configuration file (TOML)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .global(true)
                .default_value("warn")
                .help("Log level (off, error, warn, info, debug, trace)"),
        )
        .subcommand(create)
        .subcommand(Command::new("list").about("List available image and code types."))
}

/// Builds a usage error reported against the `create` subcommand.
pub fn usage_error(capabilities: Capabilities, message: impl fmt::Display) -> clap::Error {
    let mut cmd = command(capabilities);
    cmd.build();
    let mut create = cmd.find_subcommand("create").cloned().unwrap_or(cmd);
    create.error(ErrorKind::InvalidValue, message)
}
