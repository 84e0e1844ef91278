//! Packlint CLI - validate content packs against the error catalog
//!
//! This is the main entry point for the packlint CLI application, providing
//! commands for validating content files, listing error codes and managing
//! configuration.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Run the application
    let result = run(cli).await;

    match result {
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
async fn run(cli: Cli) -> Result<()> {
    // Logging settings can come from the config file, so load it first
    let config = Config::load_with_file(cli.config.as_deref())?;

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    dispatch(cli, config).await
}

#[instrument(skip_all, fields(command = ?cli.command))]
async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let timer = Timer::new("cli_execution");

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);
    if !config.output.progress {
        output.disable_progress();
    }

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    let result = match cli.command {
        Commands::Validate(args) => handlers::handle_validate(args, &config, &mut output).await,
        Commands::Codes(args) => handlers::handle_codes(args, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    };

    timer.finish();
    result
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.apply_section(&config.logging, cli.verbosity_level());

    // Apply environment overrides
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
        let cli = Cli::parse_from(["packlint", "-vv", "validate", "rule.yml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["packlint", "--quiet", "validate", "rule.yml"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["packlint", "codes", "--category", "advisory"]);
        assert!(matches!(cli.command, Commands::Codes(_)));
    }
}
