//! # Validate Subcommand
//!
//! Validates a document, or a batch of documents, as one record kind and
//! reports either the normalized records or every violation found.
//!
//! A single failing entry fails the run, but every entry is still checked
//! so one invocation surfaces all problems.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use clinic_core::{ValidationOptions, Violation};
use clinic_schema::{into_batch, RecordKind};

/// Arguments for the `clinic validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Record kind to validate as (user, product, appointment).
    #[arg(long, short)]
    pub kind: RecordKind,

    /// Document to validate (.json, .yaml, .yml). Reads JSON from stdin when omitted or `-`.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub report: ReportFormat,
}

/// Output format of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Normalized records on success, violation listing on failure.
    Text,
    /// A single JSON report object.
    Json,
}

/// Outcome of validating one batch entry.
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    pub index: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

/// Report over a whole input.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub input: String,
    pub kind: RecordKind,
    pub collection: String,
    pub total: usize,
    pub passed: usize,
    pub entries: Vec<EntryOutcome>,
}

impl ValidationReport {
    /// Whether every entry validated.
    pub fn all_valid(&self) -> bool {
        self.passed == self.total
    }

    /// Exit code for this report: 0 if all entries validated, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.all_valid() {
            0
        } else {
            1
        }
    }
}

/// Validate every entry of `document` as `kind`.
pub fn build_report(
    input: &str,
    kind: RecordKind,
    document: Value,
    options: &ValidationOptions,
) -> Result<ValidationReport> {
    let mut entries = Vec::new();
    for (index, raw) in into_batch(document).into_iter().enumerate() {
        let outcome = match kind.validate(&raw, options) {
            Ok(record) => EntryOutcome {
                index,
                valid: true,
                document: Some(
                    record
                        .to_document()
                        .with_context(|| format!("failed to serialize {kind} #{index}"))?,
                ),
                violations: Vec::new(),
            },
            Err(err) => EntryOutcome {
                index,
                valid: false,
                document: None,
                violations: err.into_violations().into_inner(),
            },
        };
        entries.push(outcome);
    }

    let passed = entries.iter().filter(|e| e.valid).count();
    Ok(ValidationReport {
        input: input.to_string(),
        kind,
        collection: kind.collection(),
        total: entries.len(),
        passed,
        entries,
    })
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure. Operational
/// errors propagate and map to exit code 2 through [`crate::exit_code`].
pub fn run_validate(args: &ValidateArgs, options: &ValidationOptions) -> Result<u8> {
    let input = crate::input_name(args.path.as_ref());
    let document = crate::read_input(args.path.as_ref())?;
    let batch = matches!(document, Value::Array(_));

    let report = build_report(&input, args.kind, document, options)?;
    tracing::info!(
        input = %report.input,
        kind = %report.kind,
        total = report.total,
        passed = report.passed,
        "validation finished"
    );

    match args.report {
        ReportFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to render report")?
            );
        }
        ReportFormat::Text => print_text(&report, batch)?,
    }

    Ok(report.exit_code())
}

fn print_text(report: &ValidationReport, batch: bool) -> Result<()> {
    if report.all_valid() {
        let documents: Vec<&Value> = report
            .entries
            .iter()
            .filter_map(|e| e.document.as_ref())
            .collect();
        let rendered = match (batch, documents.as_slice()) {
            (false, [single]) => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(&documents),
        }
        .context("failed to render documents")?;
        println!("{rendered}");
        return Ok(());
    }

    for entry in report.entries.iter().filter(|e| !e.valid) {
        let location = if batch {
            format!("{}[{}]", report.input, entry.index)
        } else {
            report.input.clone()
        };
        println!(
            "FAIL: {location}: {} rejected with {} violation(s)",
            report.kind,
            entry.violations.len()
        );
        for violation in &entry.violations {
            println!("{violation}");
        }
    }
    println!(
        "{} of {} {} record(s) valid",
        report.passed, report.total, report.kind
    );
    Ok(())
}
