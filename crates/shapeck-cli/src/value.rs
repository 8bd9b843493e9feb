//! # Value Subcommand
//!
//! Validates a document, or one sub-value addressed by JSON pointer, against
//! a single type descriptor. A pointer that resolves to nothing validates as
//! an absent value, so `T?` descriptors accept it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use shapeck_core::{validate_mixed, Check, EnumDefinition};

use crate::{load_document, report, OutputFormat};

/// Arguments for the value subcommand.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Document to validate (JSON, or YAML by extension).
    pub document: PathBuf,

    /// Type descriptor, e.g. `number`, `string?`, `array<boolean>`.
    #[arg(long = "type", short = 't', value_name = "DESCRIPTOR")]
    pub descriptor: String,

    /// Enum definition file (object of member name to number or string).
    #[arg(long = "enum", value_name = "FILE")]
    pub enum_file: Option<PathBuf>,

    /// JSON pointer selecting the value to validate, e.g. `/lines/0`.
    #[arg(long)]
    pub pointer: Option<String>,
}

/// Execute the value subcommand.
pub fn run_value(args: &ValueArgs, format: OutputFormat) -> Result<u8> {
    let check = match &args.enum_file {
        Some(path) => {
            let def = EnumDefinition::from_value(&load_document(path)?)
                .with_context(|| format!("invalid enum definition: {}", path.display()))?;
            Check::Enum(def)
        }
        None => Check::None,
    };

    let document = load_document(&args.document)?;
    let target = match &args.pointer {
        Some(pointer) => document.pointer(pointer),
        None => Some(&document),
    };
    tracing::debug!(
        descriptor = %args.descriptor,
        pointer = args.pointer.as_deref().unwrap_or(""),
        present = target.is_some(),
        "validating value"
    );

    let outcome = validate_mixed(target, &args.descriptor, &check)?;
    report(&outcome, format)
}
