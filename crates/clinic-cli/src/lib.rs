//! # clinic-cli — Clinic Records Command-Line Interface
//!
//! A clap-based front end over `clinic-schema` for checking documents
//! before they reach the database, and for handing record schemas to
//! other tools.
//!
//! ## Subcommands
//!
//! - `validate` — Validate a JSON/YAML document (or batch) as a record kind
//! - `schema` — Print the JSON Schema of a record kind
//! - `kinds` — List record kinds and their collections
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `clinic-schema`; no validation rules live here.
//! - Exit codes: 0 success, 1 validation failure, 2 operational error.

pub mod schema;
pub mod validate;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use clinic_core::{Coercion, ValidationOptions};
use clinic_schema::{load_document, parse_document, DocumentFormat};

/// Exit code for failures other than validation failures: unreadable or
/// unparseable input, bad configuration.
pub const EXIT_OPERATIONAL_ERROR: u8 = 2;

/// Map a subcommand result to the process exit code, logging any
/// operational error.
pub fn exit_code(result: Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            EXIT_OPERATIONAL_ERROR
        }
    }
}

/// Build validation options from an optional config file and CLI flags.
///
/// Flags only ever tighten what the config file sets.
pub fn resolve_options(
    config: Option<&Path>,
    strict: bool,
    deny_unknown_fields: bool,
) -> Result<ValidationOptions> {
    let mut options = match config {
        Some(path) => ValidationOptions::load(path)
            .with_context(|| format!("failed to load options from {}", path.display()))?,
        None => ValidationOptions::default(),
    };
    if strict {
        options = options.with_coercion(Coercion::Strict);
    }
    if deny_unknown_fields {
        options = options.with_deny_unknown_fields(true);
    }
    tracing::debug!(
        coercion = %options.coercion,
        deny_unknown_fields = options.deny_unknown_fields,
        "resolved validation options"
    );
    Ok(options)
}

/// Read the input document. `None` or `-` reads JSON from stdin.
pub fn read_input(path: Option<&PathBuf>) -> Result<Value> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            load_document(path).with_context(|| format!("failed to load {}", path.display()))
        }
        _ => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            parse_document(&content, DocumentFormat::Json, "-").context("failed to parse stdin")
        }
    }
}

/// Human-readable name of the input, for reports.
pub fn input_name(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}
