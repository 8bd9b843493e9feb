//! # shapeck CLI entry point
//!
//! Parses command-line arguments, sets up tracing, and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shapeck_cli::check::{run_check, CheckArgs};
use shapeck_cli::value::{run_value, ValueArgs};
use shapeck_cli::OutputFormat;

/// shapeck — runtime shape validation for JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "shapeck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for the validation outcome.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a rule table.
    Check(CheckArgs),

    /// Validate a document or sub-value against one type descriptor.
    Value(ValueArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Check(args) => run_check(args, cli.format),
        Commands::Value(args) => run_value(args, cli.format),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
