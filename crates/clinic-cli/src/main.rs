//! # clinic CLI entry point
//!
//! Parses command-line arguments, sets up logging, resolves validation
//! options and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clinic_cli::schema::{run_kinds, run_schema, SchemaArgs};
use clinic_cli::validate::{run_validate, ValidateArgs};

/// Clinic records toolkit.
///
/// Validates user, product and appointment documents before they are
/// stored, and exports the JSON Schema of each record kind.
#[derive(Parser, Debug)]
#[command(name = "clinic", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML validation options file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable lax coercion: numbers and flags must have their JSON types.
    #[arg(long, global = true)]
    strict: bool,

    /// Reject fields that are not part of the record.
    #[arg(long, global = true)]
    deny_unknown_fields: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a JSON/YAML document or batch as a record kind.
    Validate(ValidateArgs),

    /// Print the JSON Schema of a record kind.
    Schema(SchemaArgs),

    /// List record kinds and their collections.
    Kinds,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins unless -v is given.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("clinic CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Validate(args) => clinic_cli::resolve_options(
            cli.config.as_deref(),
            cli.strict,
            cli.deny_unknown_fields,
        )
        .and_then(|options| run_validate(&args, &options)),
        Commands::Schema(args) => run_schema(&args),
        Commands::Kinds => run_kinds(),
    };

    ExitCode::from(clinic_cli::exit_code(result))
}
