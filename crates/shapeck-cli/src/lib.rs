//! # shapeck-cli — Command-Line Front End
//!
//! Provides the `shapeck` binary, which validates JSON and YAML documents
//! with the `shapeck-core` engine.
//!
//! ## Subcommands
//!
//! - `shapeck check` — validate a document against a rule table file.
//! - `shapeck value` — validate a document (or a sub-value) against a single
//!   type descriptor, optionally with an enum definition file.
//!
//! ```bash
//! shapeck check order.json --rules order.rules.yaml
//! shapeck value order.json --type 'array<number>' --pointer /lines
//! shapeck --format json value status.yaml --type number --enum status.enum.json
//! ```
//!
//! ## Exit Codes
//!
//! - `0` — the document conforms.
//! - `1` — the command failed (unreadable file, malformed rule table, ...).
//! - `2` — the document does not conform.

pub mod check;
pub mod value;

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;
use shapeck_core::Outcome;

/// Exit code for a conforming document.
pub const EXIT_VALID: u8 = 0;

/// Exit code for a non-conforming document.
pub const EXIT_INVALID: u8 = 2;

/// How outcomes are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `ok` or the failure message.
    #[default]
    Text,
    /// The outcome as a JSON object.
    Json,
}

/// Load a JSON or YAML document.
///
/// The format is chosen by extension: `.yaml`/`.yml` are YAML, everything
/// else is JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read file: {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value = match ext {
        "yaml" | "yml" => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                .with_context(|| format!("invalid YAML: {}", path.display()))?;
            let yaml = normalize_yaml(yaml)
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("YAML-to-JSON conversion failed: {}", path.display()))?;
            serde_yaml::from_value(yaml)
                .with_context(|| format!("YAML-to-JSON conversion failed: {}", path.display()))?
        }
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON: {}", path.display()))?,
    };
    tracing::debug!(path = %path.display(), "loaded document");
    Ok(value)
}

/// Rewrite mapping keys to strings and drop tags, so the YAML tree
/// deserializes directly into a `serde_json::Value`.
///
/// Number and boolean keys become their text; any other key is rejected.
fn normalize_yaml(yaml: serde_yaml::Value) -> Result<serde_yaml::Value, String> {
    use serde_yaml::Value as Yaml;

    match yaml {
        Yaml::Mapping(map) => {
            let mut out = serde_yaml::Mapping::new();
            for (k, v) in map {
                let key = match k {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                out.insert(Yaml::String(key), normalize_yaml(v)?);
            }
            Ok(Yaml::Mapping(out))
        }
        Yaml::Sequence(seq) => seq
            .into_iter()
            .map(normalize_yaml)
            .collect::<Result<Vec<_>, _>>()
            .map(Yaml::Sequence),
        Yaml::Tagged(tagged) => normalize_yaml(tagged.value),
        scalar => Ok(scalar),
    }
}

/// Print an outcome and return the matching exit code.
pub fn report(outcome: &Outcome, format: OutputFormat) -> Result<u8> {
    println!("{}", render(outcome, format)?);
    Ok(if outcome.ok { EXIT_VALID } else { EXIT_INVALID })
}

fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(outcome.to_string()),
        OutputFormat::Json => {
            serde_json::to_string(outcome).context("failed to serialize outcome")
        }
    }
}
