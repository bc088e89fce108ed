//! Packetdoc CLI - HTML reference pages for cereal packet schemas
//!
//! This is the main entry point for the Packetdoc CLI application. It scans
//! a directory of packet schemas, writes one page per packet and an index
//! page, then prints a summary of the run.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::Cli;
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Load configuration before logging so its [logging] section applies
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::format_error(&e, cli.use_color()));
            process::exit(e.exit_code());
        }
    };

    // Set up colored output
    control::set_override(cli.use_color() && config.output.color);

    // Initialize logging
    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    match run(cli, config) {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip_all, fields(input = ?cli.input_dir, output = ?cli.output_dir))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let format = match cli.output {
        Some(format) => format,
        None => config.output_format()?,
    };
    let mut output = OutputWriter::new(
        format,
        control::SHOULD_COLORIZE.should_colorize(),
        cli.quiet,
    );

    tracing::info!(
        verbosity = cli.verbosity_level(),
        format = ?format,
        "Starting documentation run"
    );

    let report = handlers::handle_generate(&cli, &config, &mut output)?;
    tracing::info!(
        rendered = report.rendered,
        skipped = report.skipped,
        failed = report.failed,
        "Documentation run finished"
    );
    Ok(())
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // Create logging configuration from CLI args, the config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_file(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["packetdoc", "schemas"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["packetdoc", "-vv", "schemas", "site"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["packetdoc", "--quiet", "schemas"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_run_reports_missing_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let cli = Cli::parse_from([
            std::ffi::OsStr::new("packetdoc"),
            missing.as_os_str(),
            std::ffi::OsStr::new("-q"),
        ]);

        let err = run(cli, Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
