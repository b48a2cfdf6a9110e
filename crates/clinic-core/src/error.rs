//! # Error Types — Violations and the Error Hierarchy
//!
//! Every way a raw document can fail to become a record is expressed as a
//! [`Rule`] attached to a field name. A failed validation carries all of
//! them in a [`ValidationError`]; nothing is dropped after the first.
//!
//! ## Design
//!
//! - `Rule` is a closed set. Each variant carries the bound it enforced so
//!   callers can render their own messages.
//! - Violations on the document itself (not an object) use the empty field
//!   name and display as `(root)`.
//! - [`ClinicError`] wraps validation failures together with the I/O-facing
//!   failures of document and configuration loading.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::field::FieldType;

/// The rule a field value violated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// A required field was not present.
    Missing,
    /// The value could not be read as the field's type.
    WrongType {
        /// The type the field expects.
        expected: FieldType,
    },
    /// Text was empty or whitespace only.
    Blank,
    /// Text had fewer characters than allowed.
    TooShort {
        /// Inclusive minimum character count.
        min: usize,
    },
    /// Text had more characters than allowed.
    TooLong {
        /// Inclusive maximum character count.
        max: usize,
    },
    /// A number was below its inclusive lower bound.
    TooSmall {
        /// Inclusive lower bound.
        min: f64,
    },
    /// A number was above its inclusive upper bound.
    TooLarge {
        /// Inclusive upper bound.
        max: f64,
    },
    /// A floating-point value was NaN or infinite.
    NotFinite,
    /// Text did not have the `local@domain` structure of an email address.
    InvalidEmail,
    /// Text was not a `YYYY-MM-DD` calendar date.
    InvalidDate,
    /// The value is not a member of the field's enumeration.
    NotAllowed {
        /// Every accepted value.
        allowed: &'static [&'static str],
    },
    /// The field is not part of the record kind.
    UnknownField,
    /// The document is not a mapping of field names to values.
    NotAnObject,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("field is required"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::Blank => f.write_str("must not be blank"),
            Self::TooShort { min } => write!(f, "must be at least {min} characters"),
            Self::TooLong { max } => write!(f, "must be at most {max} characters"),
            Self::TooSmall { min } => write!(f, "must be greater than or equal to {min}"),
            Self::TooLarge { max } => write!(f, "must be less than or equal to {max}"),
            Self::NotFinite => f.write_str("must be a finite number"),
            Self::InvalidEmail => f.write_str("must be a valid email address"),
            Self::InvalidDate => f.write_str("must be a calendar date (YYYY-MM-DD)"),
            Self::NotAllowed { allowed } => {
                write!(f, "must be one of: {}", allowed.join(", "))
            }
            Self::UnknownField => f.write_str("unknown field"),
            Self::NotAnObject => f.write_str("expected an object of field values"),
        }
    }
}

/// A single violated rule on a named field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Field name as it appears in the raw document. Empty for the root.
    pub field: String,
    /// The rule the field violated.
    #[serde(flatten)]
    pub rule: Rule,
}

impl Violation {
    /// Create a violation for `field`.
    pub fn new(field: impl Into<String>, rule: Rule) -> Self {
        Self {
            field: field.into(),
            rule,
        }
    }

    /// Returns true if this violation concerns the document itself.
    pub fn is_root(&self) -> bool {
        self.field.is_empty()
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "  (root): {}", self.rule)
        } else {
            write!(f, "  {}: {}", self.field, self.rule)
        }
    }
}

/// Ordered collection of violations, in field-check order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, field: impl Into<String>, rule: Rule) {
        self.violations.push(Violation::new(field, rule));
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns true if any violation concerns `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// The first rule recorded against `field`, if any.
    pub fn rule_for(&self, field: &str) -> Option<&Rule> {
        self.violations
            .iter()
            .find(|v| v.field == field)
            .map(|v| &v.rule)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A raw document was rejected for a record kind.
///
/// Carries every violation found, never just the first.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{record} rejected with {count} violation(s):\n{violations}", count = .violations.len())]
pub struct ValidationError {
    record: &'static str,
    violations: Violations,
}

impl ValidationError {
    /// Create an error for the named record kind.
    pub fn new(record: &'static str, violations: Violations) -> Self {
        Self { record, violations }
    }

    /// Name of the record kind that rejected the document.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// All violations, in field-check order.
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Returns true if any violation concerns `field`.
    pub fn has_violation(&self, field: &str) -> bool {
        self.violations.contains_field(field)
    }

    /// The first rule recorded against `field`, if any.
    pub fn rule_for(&self, field: &str) -> Option<&Rule> {
        self.violations.rule_for(field)
    }

    /// Consumes self and returns the violations.
    pub fn into_violations(self) -> Violations {
        self.violations
    }
}

/// Top-level error for the clinic workspace.
#[derive(Error, Debug)]
pub enum ClinicError {
    /// A document failed record validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A document could not be read or parsed.
    #[error("document error for '{path}': {reason}")]
    Document {
        /// Path (or `-` for stdin) of the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// Validation options could not be loaded.
    #[error("config error: {0}")]
    Config(String),

    /// A record kind name did not match any known kind.
    #[error("unknown record kind {name:?}; expected one of: {expected}")]
    UnknownKind {
        /// The name that was looked up.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
