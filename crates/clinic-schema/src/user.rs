//! Person-contact record (`user` collection).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clinic_core::{
    check_int_range, FieldReader, NonEmptyText, Rule, ValidationError, ValidationOptions,
};

use crate::record::{Record, RecordKind};

/// Oldest accepted age, in years.
pub const AGE_MAX: u8 = 120;

/// Age in whole years, 0 through 120 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an age.
    pub fn new(years: i64) -> Result<Self, Rule> {
        let years = check_int_range(years, 0..=i64::from(AGE_MAX))?;
        u8::try_from(years)
            .map(Self)
            .map_err(|_| Rule::TooLarge {
                max: f64::from(AGE_MAX),
            })
    }

    /// Years as a number.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl From<Age> for u8 {
    fn from(age: Age) -> Self {
        age.0
    }
}

impl TryFrom<i64> for Age {
    type Error = Rule;

    fn try_from(years: i64) -> Result<Self, Self::Error> {
        Self::new(years)
    }
}

/// A person known to the clinic.
///
/// ## Invariants
/// - `name` has at least one non-whitespace character.
/// - `email` and `address` are present; their content is not checked.
/// - `age`, when present, is within 0..=120.
/// - `is_active` defaults to `true` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct User {
    name: NonEmptyText,
    email: String,
    address: String,
    age: Option<Age>,
    is_active: bool,
}

impl User {
    /// Full name.
    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    /// Email address as given.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Age in years, if provided.
    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Whether the user is active.
    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Record for User {
    const KIND: RecordKind = RecordKind::User;

    fn from_raw(raw: &Value, options: &ValidationOptions) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::KIND.type_name(), raw, options);
        let name = reader.required_text("name", NonEmptyText::new);
        let email = reader.required_text("email", Ok);
        let address = reader.required_text("address", Ok);
        let age = reader.optional_integer("age", Age::new);
        let is_active = reader.boolean_or("is_active", true);

        reader.finish(move || {
            Some(Self {
                name: name?,
                email: email?,
                address: address?,
                age: age?,
                is_active: is_active?,
            })
        })
    }
}

impl TryFrom<Value> for User {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::from_raw(&raw, &ValidationOptions::default())
    }
}
