//! Binary entry point for confdedup.
//!
//! This binary provides the CLI interface for the block deduplication
//! engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use confdedup::cli::{ExampleCommand, RunCommand};
use confdedup::config::AppConfig;
use confdedup::io::formats::Format;
use confdedup::observability::{self, LoggingConfig};

/// Confdedup - removes duplicate configuration blocks from device configs.
#[derive(Parser)]
#[command(name = "confdedup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Deduplicate a configuration file.
    Run {
        /// Input file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Output file for the deduplicated text; stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Block start keywords, comma-separated
        /// (e.g. "controller, router, interface, route, tunnel-te, ioam").
        #[arg(short, long)]
        keywords: Option<String>,

        /// Block end marker.
        #[arg(short, long)]
        end_marker: Option<String>,

        /// Also close blocks on bare numeral lines.
        #[arg(long)]
        numeral_boundary: bool,

        /// Write a duplicate report to this path.
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Report format: json or csv.
        #[arg(long, default_value = "json")]
        report_format: String,
    },

    /// Print a sample configuration with repeated blocks.
    Example,
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let logging = LoggingConfig::from_settings(
        config.logging.as_ref(),
        cli.verbose,
    );
    if let Err(e) = observability::init(&logging) {
        eprintln!("Failed to initialize observability: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Run {
            input,
            output,
            keywords,
            end_marker,
            numeral_boundary,
            report,
            report_format,
        } => {
            let command = RunCommand {
                input,
                output,
                keywords,
                end_marker,
                numeral_boundary,
                report,
                report_format: Format::parse(&report_format)?,
            };
            command.execute(config).await?;
            Ok(())
        },

        Commands::Example => {
            ExampleCommand::new().execute()?;
            Ok(())
        },
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return AppConfig::load_from_file(std::path::Path::new(config_path))
            .map_err(std::convert::Into::into);
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("CONFDEDUP_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return AppConfig::load_from_file(std::path::Path::new(&config_path))
                .map_err(std::convert::Into::into);
        }
    }

    // Otherwise, environment variables and defaults
    Ok(AppConfig::load_default())
}
