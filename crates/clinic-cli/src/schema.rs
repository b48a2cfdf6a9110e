//! # Schema and Kinds Subcommands
//!
//! `clinic schema` prints the JSON Schema of a record kind; `clinic kinds`
//! lists the record kinds with their collections.

use anyhow::{Context, Result};
use clap::Args;

use clinic_schema::RecordKind;

/// Arguments for the `clinic schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Record kind whose schema to print (user, product, appointment).
    #[arg(long, short)]
    pub kind: RecordKind,

    /// Print compact JSON on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Render a kind's schema as JSON text.
pub fn render_schema(kind: RecordKind, compact: bool) -> Result<String> {
    let schema = kind.json_schema();
    let rendered = if compact {
        serde_json::to_string(&schema)
    } else {
        serde_json::to_string_pretty(&schema)
    };
    rendered.with_context(|| format!("failed to render {kind} schema"))
}

/// Execute the schema subcommand.
pub fn run_schema(args: &SchemaArgs) -> Result<u8> {
    println!("{}", render_schema(args.kind, args.compact)?);
    Ok(0)
}

/// One table row per record kind: type name, collection, label.
pub fn kinds_table() -> Vec<String> {
    let mut rows = vec![format!("{:<12} {:<12} {}", "KIND", "COLLECTION", "LABEL")];
    rows.extend(RecordKind::all().iter().map(|kind| {
        format!(
            "{:<12} {:<12} {}",
            kind.type_name(),
            kind.collection(),
            kind.label()
        )
    }));
    rows
}

/// Execute the kinds subcommand.
pub fn run_kinds() -> Result<u8> {
    for row in kinds_table() {
        println!("{row}");
    }
    Ok(0)
}
