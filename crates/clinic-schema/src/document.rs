//! # Document Loading
//!
//! Reads raw documents from JSON or YAML files into the `serde_json`
//! value model that record validation consumes.
//!
//! A file holds either one document (an object) or a batch (an array of
//! objects). Unquoted YAML dates such as `2026-03-14` load as strings,
//! which is what `preferred_date` expects.

use std::path::Path;

use serde_json::{Map, Value};

use clinic_core::ClinicError;

/// Source format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (JSON-compatible subset).
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension: `.yaml`/`.yml` is YAML,
    /// anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse document text. `origin` names the source in error messages.
///
/// # Errors
///
/// Returns [`ClinicError::Document`] if the text is not valid in `format`
/// or the YAML cannot be represented as JSON.
pub fn parse_document(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<Value, ClinicError> {
    let document_error = |reason: String| ClinicError::Document {
        path: origin.to_string(),
        reason,
    };

    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).map_err(|e| document_error(format!("invalid JSON: {e}")))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(content)
                .map_err(|e| document_error(format!("invalid YAML: {e}")))?;
            yaml_to_json(yaml)
                .map_err(|e| document_error(format!("YAML-to-JSON conversion failed: {e}")))
        }
    }
}

/// Load a document file, choosing the format from its extension.
///
/// # Errors
///
/// Returns [`ClinicError::Document`] if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, ClinicError> {
    let content = std::fs::read_to_string(path).map_err(|e| ClinicError::Document {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, "loading document");
    parse_document(&content, format, &path.display().to_string())
}

/// Split a loaded document into the raw records it holds.
///
/// An array yields its elements; anything else is a single record.
pub fn into_batch(document: Value) -> Vec<Value> {
    match document {
        Value::Array(items) => items,
        other => vec![other],
    }
}

/// Convert a parsed YAML document into the JSON value model.
///
/// Mapping keys may be strings, numbers or booleans; the latter two are
/// stringified. Tags are dropped in favor of the tagged value.
fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    let value = match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => json_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>, String>>()?,
        ),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| -> Result<(String, Value), String> {
                    Ok((mapping_key(key)?, yaml_to_json(value)?))
                })
                .collect::<Result<Map<String, Value>, String>>()?,
        ),
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    };
    Ok(value)
}

fn json_number(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| format!("number {n} has no JSON form"))
}

fn mapping_key(key: serde_yaml::Value) -> Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("mapping key {other:?} is not a scalar")),
    }
}
