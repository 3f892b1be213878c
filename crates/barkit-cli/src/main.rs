//! barkit CLI entry point.

use std::{io, process, str::FromStr};

use log::{LevelFilter, debug, error, info};

use barkit_cli::{Args, Capabilities, CliError, error_adapter::ErrorAdapter};

fn main() {
    // Install miette's pretty panic hook early for better panic reports
    miette::set_panic_hook();

    let capabilities = Capabilities::detect();
    let args = Args::parse(capabilities);

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?, raster = capabilities.raster(); "Starting barkit");
    debug!(args:?; "Parsed arguments");

    let mut stdout = io::stdout().lock();
    match barkit_cli::run(&args, capabilities, &mut stdout) {
        Ok(()) => info!("Completed successfully"),
        Err(CliError::Usage(err)) => err.exit(),
        Err(err) => {
            let mut writer = String::new();
            miette::GraphicalReportHandler::new()
                .render_report(&mut writer, &ErrorAdapter(&err))
                .expect("Writing to String buffer is infallible");

            error!("{writer}");
            process::exit(1);
        }
    }
}
