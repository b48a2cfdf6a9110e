//! # Validation Options
//!
//! Knobs that change how raw documents are read, not which rules apply.
//! Defaults follow the lenient behavior of the model layer the records
//! were first declared in: numeric strings coerce, unknown fields are
//! ignored.
//!
//! Options can be loaded from a YAML file:
//!
//! ```yaml
//! coercion: strict
//! deny_unknown_fields: true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ClinicError;

/// How raw JSON values are mapped onto field types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    /// Accept numeric strings for numbers, `"yes"`/`1` and friends for
    /// booleans, and integral floats for integers.
    #[default]
    Lax,
    /// Accept only the native JSON type of each field. Floats still
    /// accept integers.
    Strict,
}

impl Coercion {
    /// Returns the snake_case identifier used in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lax => "lax",
            Self::Strict => "strict",
        }
    }
}

impl std::fmt::Display for Coercion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options applied to every field read during validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationOptions {
    /// Coercion mode for numeric, boolean and date fields.
    pub coercion: Coercion,
    /// Report fields the record kind does not declare.
    pub deny_unknown_fields: bool,
}

impl ValidationOptions {
    /// Strict coercion, unknown fields denied.
    pub fn strict() -> Self {
        Self {
            coercion: Coercion::Strict,
            deny_unknown_fields: true,
        }
    }

    /// Returns a copy with the given coercion mode.
    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Returns a copy with unknown-field reporting switched on or off.
    pub fn with_deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }

    /// Returns true if only native JSON types are accepted.
    pub fn is_strict(&self) -> bool {
        self.coercion == Coercion::Strict
    }

    /// Parse options from YAML text. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Config`] if the YAML is malformed or names an
    /// unknown option.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ClinicError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| ClinicError::Config(format!("invalid options: {e}")))
    }

    /// Load options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ClinicError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClinicError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }
}
