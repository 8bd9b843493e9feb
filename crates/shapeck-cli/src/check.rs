//! # Check Subcommand
//!
//! Validates a whole document against a rule table file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shapeck_core::{validate_dictionary, RuleTable};

use crate::{load_document, report, OutputFormat};

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Document to validate (JSON, or YAML by extension).
    pub document: PathBuf,

    /// Rule table file mapping field names to descriptors.
    #[arg(long, short)]
    pub rules: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs, format: OutputFormat) -> Result<u8> {
    let rules_doc = load_document(&args.rules)?;
    let table = RuleTable::from_value(&rules_doc)
        .with_context(|| format!("invalid rule table: {}", args.rules.display()))?;
    tracing::info!(fields = table.len(), rules = %args.rules.display(), "rule table loaded");

    let document = load_document(&args.document)?;
    let outcome = validate_dictionary(&document, &table)?;
    if !outcome.ok {
        tracing::warn!(document = %args.document.display(), "document does not conform");
    }
    report(&outcome, format)
}
