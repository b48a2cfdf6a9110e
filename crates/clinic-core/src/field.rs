//! # Field Reading
//!
//! [`FieldReader`] walks a raw document one declared field at a time.
//! Each accessor applies presence, type coercion and the field's own
//! constraint, and on failure records a [`Violation`](crate::Violation)
//! and returns `None`. Nothing stops at the first failure: a record
//! constructor reads every field, then hands the results to
//! [`FieldReader::finish`], which either builds the record or returns
//! every violation collected.
//!
//! ```
//! use clinic_core::{FieldReader, NonEmptyText, ValidationOptions};
//! use serde_json::json;
//!
//! let raw = json!({"title": "Floss", "in_stock": "yes"});
//! let mut reader = FieldReader::new("Product", &raw, &ValidationOptions::default());
//! let title = reader.required_text("title", NonEmptyText::new);
//! let in_stock = reader.boolean_or("in_stock", true);
//! let (title, in_stock) = reader.finish(move || Some((title?, in_stock?))).unwrap();
//! assert_eq!(title.as_str(), "Floss");
//! assert!(in_stock);
//! ```
//!
//! ## Null
//!
//! `null` on an optional field reads as absent. On a required or
//! defaulted field it is a type violation, not a missing field.
//!
//! ## Coercion
//!
//! See [`Coercion`] for what each mode accepts. Integers that do not fit
//! in `i64` saturate in either mode, so they fail any range check instead
//! of wrapping. This includes integer literals too large for `u64`, which
//! `serde_json` hands over as floats.

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Rule, ValidationError, Violations};
use crate::options::{Coercion, ValidationOptions};
use crate::temporal::CalendarDate;

/// The type a field's raw value is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Unicode text.
    Text,
    /// Signed whole number.
    Integer,
    /// Floating-point number.
    Float,
    /// `true` or `false`.
    Boolean,
    /// Calendar date, `YYYY-MM-DD`.
    Date,
}

impl FieldType {
    /// Returns the snake_case identifier used in violation reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
        }
    }

    /// The JSON Schema `type` keyword for this field type.
    pub fn json_type(&self) -> &'static str {
        match self {
            Self::Text | Self::Date => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads declared fields out of a raw document, collecting violations.
#[derive(Debug)]
pub struct FieldReader<'a> {
    record: &'static str,
    fields: Option<&'a Map<String, Value>>,
    options: ValidationOptions,
    seen: Vec<&'static str>,
    violations: Violations,
}

impl<'a> FieldReader<'a> {
    /// Start reading `raw` as a `record`.
    ///
    /// A non-object `raw` records a single root violation; every accessor
    /// then returns `None` without adding more.
    pub fn new(record: &'static str, raw: &'a Value, options: &ValidationOptions) -> Self {
        let mut violations = Violations::new();
        let fields = raw.as_object();
        if fields.is_none() {
            violations.push("", Rule::NotAnObject);
        }
        Self {
            record,
            fields,
            options: *options,
            seen: Vec::new(),
            violations,
        }
    }

    /// Name of the record kind being read.
    pub fn record(&self) -> &'static str {
        self.record
    }

    /// Violations collected so far.
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Required text field.
    pub fn required_text<T>(
        &mut self,
        name: &'static str,
        check: impl FnOnce(String) -> Result<T, Rule>,
    ) -> Option<T> {
        let value = self.required_value(name, FieldType::Text)?;
        let result = coerce_text(value).and_then(check);
        self.settle(name, result)
    }

    /// Optional text field. `Some(None)` means absent.
    pub fn optional_text<T>(
        &mut self,
        name: &'static str,
        check: impl FnOnce(String) -> Result<T, Rule>,
    ) -> Option<Option<T>> {
        match self.optional_value(name) {
            None => Some(None),
            Some(value) => {
                let result = coerce_text(value).and_then(check);
                self.settle(name, result).map(Some)
            }
        }
    }

    /// Text field that takes `default` when absent.
    pub fn text_or<T>(
        &mut self,
        name: &'static str,
        default: T,
        check: impl FnOnce(String) -> Result<T, Rule>,
    ) -> Option<T> {
        match self.defaulted_value(name, FieldType::Text)? {
            None => Some(default),
            Some(value) => {
                let result = coerce_text(value).and_then(check);
                self.settle(name, result)
            }
        }
    }

    /// Required integer field.
    pub fn required_integer<T>(
        &mut self,
        name: &'static str,
        check: impl FnOnce(i64) -> Result<T, Rule>,
    ) -> Option<T> {
        let value = self.required_value(name, FieldType::Integer)?;
        let result = coerce_integer(value, self.options.coercion).and_then(check);
        self.settle(name, result)
    }

    /// Optional integer field. `Some(None)` means absent.
    pub fn optional_integer<T>(
        &mut self,
        name: &'static str,
        check: impl FnOnce(i64) -> Result<T, Rule>,
    ) -> Option<Option<T>> {
        match self.optional_value(name) {
            None => Some(None),
            Some(value) => {
                let result = coerce_integer(value, self.options.coercion).and_then(check);
                self.settle(name, result).map(Some)
            }
        }
    }

    /// Required floating-point field.
    pub fn required_float<T>(
        &mut self,
        name: &'static str,
        check: impl FnOnce(f64) -> Result<T, Rule>,
    ) -> Option<T> {
        let value = self.required_value(name, FieldType::Float)?;
        let result = coerce_float(value, self.options.coercion).and_then(check);
        self.settle(name, result)
    }

    /// Boolean field that takes `default` when absent.
    pub fn boolean_or(&mut self, name: &'static str, default: bool) -> Option<bool> {
        match self.defaulted_value(name, FieldType::Boolean)? {
            None => Some(default),
            Some(value) => {
                let result = coerce_boolean(value, self.options.coercion);
                self.settle(name, result)
            }
        }
    }

    /// Required calendar date field.
    pub fn required_date(&mut self, name: &'static str) -> Option<CalendarDate> {
        let value = self.required_value(name, FieldType::Date)?;
        let result = match value {
            Value::String(s) => CalendarDate::parse(s),
            _ => Err(Rule::WrongType {
                expected: FieldType::Date,
            }),
        };
        self.settle(name, result)
    }

    /// Finish reading and build the record.
    ///
    /// `build` assembles the record from the values returned by the
    /// accessors, typically with `?` on each. It only runs to completion
    /// when no violation was recorded, and every accessor that returned
    /// `None` recorded one.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] carrying every violation collected,
    /// including unknown fields when
    /// [`deny_unknown_fields`](ValidationOptions::deny_unknown_fields) is set.
    pub fn finish<T>(mut self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationError> {
        if self.options.deny_unknown_fields {
            if let Some(fields) = self.fields {
                for key in fields.keys() {
                    if !self.seen.iter().any(|name| *name == key.as_str()) {
                        self.violations.push(key.clone(), Rule::UnknownField);
                    }
                }
            }
        }

        if self.violations.is_empty() {
            if let Some(record) = build() {
                return Ok(record);
            }
        }
        Err(ValidationError::new(self.record, self.violations))
    }

    fn required_value(&mut self, name: &'static str, expected: FieldType) -> Option<&'a Value> {
        let fields = self.fields?;
        self.seen.push(name);
        match fields.get(name) {
            None => {
                self.violations.push(name, Rule::Missing);
                None
            }
            Some(Value::Null) => {
                self.violations.push(name, Rule::WrongType { expected });
                None
            }
            Some(value) => Some(value),
        }
    }

    /// `None` for absent or null.
    fn optional_value(&mut self, name: &'static str) -> Option<&'a Value> {
        let fields = self.fields?;
        self.seen.push(name);
        fields.get(name).filter(|value| !value.is_null())
    }

    /// Outer `None` on violation, inner `None` when absent.
    fn defaulted_value(
        &mut self,
        name: &'static str,
        expected: FieldType,
    ) -> Option<Option<&'a Value>> {
        let fields = self.fields?;
        self.seen.push(name);
        match fields.get(name) {
            None => Some(None),
            Some(Value::Null) => {
                self.violations.push(name, Rule::WrongType { expected });
                None
            }
            Some(value) => Some(Some(value)),
        }
    }

    fn settle<T>(&mut self, name: &'static str, result: Result<T, Rule>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(rule) => {
                self.violations.push(name, rule);
                None
            }
        }
    }
}

const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
const I64_MAX_F64: f64 = 9_223_372_036_854_775_808.0;

fn wrong_type(expected: FieldType) -> Rule {
    Rule::WrongType { expected }
}

fn coerce_text(value: &Value) -> Result<String, Rule> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(wrong_type(FieldType::Text)),
    }
}

fn coerce_integer(value: &Value, coercion: Coercion) -> Result<i64, Rule> {
    let lax = coercion == Coercion::Lax;
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else if n.is_u64() {
                Ok(i64::MAX)
            } else {
                // Integer literals beyond u64 parse as f64. Float-to-int `as` saturates.
                match n.as_f64() {
                    Some(f)
                        if f.is_finite()
                            && f.fract() == 0.0
                            && (lax || !(I64_MIN_F64..I64_MAX_F64).contains(&f)) =>
                    {
                        Ok(f as i64)
                    }
                    _ => Err(wrong_type(FieldType::Integer)),
                }
            }
        }
        Value::String(s) if lax => match s.trim().parse::<i64>() {
            Ok(i) => Ok(i),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(i64::MAX),
                IntErrorKind::NegOverflow => Ok(i64::MIN),
                _ => Err(wrong_type(FieldType::Integer)),
            },
        },
        _ => Err(wrong_type(FieldType::Integer)),
    }
}

fn coerce_float(value: &Value, coercion: Coercion) -> Result<f64, Rule> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if coercion == Coercion::Lax => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    let f = parsed.ok_or_else(|| wrong_type(FieldType::Float))?;
    if f.is_finite() {
        Ok(f)
    } else {
        Err(Rule::NotFinite)
    }
}

fn coerce_boolean(value: &Value, coercion: Coercion) -> Result<bool, Rule> {
    let lax = coercion == Coercion::Lax;
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if lax => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(wrong_type(FieldType::Boolean)),
        },
        Value::String(s) if lax => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(wrong_type(FieldType::Boolean)),
        },
        _ => Err(wrong_type(FieldType::Boolean)),
    }
}
