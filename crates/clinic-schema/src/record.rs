//! # Record Kinds and Dispatch
//!
//! [`Record`] is implemented by each record type; [`RecordKind`] names
//! them at runtime and dispatches validation when the kind arrives as data
//! (a CLI flag, a collection name).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clinic_core::{collection_name, ClinicError, ValidationError, ValidationOptions};

use crate::appointment::Appointment;
use crate::product::Product;
use crate::user::User;

/// A record type constructed by validating a raw document.
pub trait Record: Sized + Serialize {
    /// The kind this type implements.
    const KIND: RecordKind;

    /// Validate `raw` and construct the record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every field that violated a
    /// rule.
    fn from_raw(raw: &Value, options: &ValidationOptions) -> Result<Self, ValidationError>;

    /// The normalized document: defaults filled in, absent optionals as
    /// `null`, coerced values in their native JSON types.
    fn to_document(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// The record kinds stored by the clinic application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Person-contact record.
    User,
    /// Catalog item.
    Product,
    /// Scheduling request.
    Appointment,
}

impl RecordKind {
    /// Returns every kind in declaration order.
    pub fn all() -> &'static [RecordKind] {
        &[Self::User, Self::Product, Self::Appointment]
    }

    /// The type name, from which the collection name is derived.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Product => "Product",
            Self::Appointment => "Appointment",
        }
    }

    /// Descriptive name of the kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "person-contact",
            Self::Product => "catalog-item",
            Self::Appointment => "scheduling-request",
        }
    }

    /// Name of the document collection holding this kind.
    pub fn collection(&self) -> String {
        collection_name(self.type_name())
    }

    /// Validate `raw` as this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated field.
    pub fn validate(
        &self,
        raw: &Value,
        options: &ValidationOptions,
    ) -> Result<ValidatedRecord, ValidationError> {
        let result = match self {
            Self::User => User::from_raw(raw, options).map(ValidatedRecord::User),
            Self::Product => Product::from_raw(raw, options).map(ValidatedRecord::Product),
            Self::Appointment => {
                Appointment::from_raw(raw, options).map(ValidatedRecord::Appointment)
            }
        };

        match &result {
            Ok(_) => tracing::debug!(kind = %self, "record accepted"),
            Err(e) => tracing::info!(
                kind = %self,
                violations = e.violations().len(),
                "record rejected"
            ),
        }
        result
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for RecordKind {
    type Err = ClinicError;

    /// Accepts the type name, collection name or label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| {
                wanted.eq_ignore_ascii_case(kind.type_name())
                    || wanted.eq_ignore_ascii_case(&kind.collection())
                    || wanted.eq_ignore_ascii_case(kind.label())
            })
            .ok_or_else(|| ClinicError::UnknownKind {
                name: s.to_string(),
                expected: Self::all()
                    .iter()
                    .map(|kind| kind.collection())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// A record of any kind that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRecord {
    /// A validated [`User`].
    User(User),
    /// A validated [`Product`].
    Product(Product),
    /// A validated [`Appointment`].
    Appointment(Appointment),
}

impl ValidatedRecord {
    /// The kind of the contained record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::User(_) => RecordKind::User,
            Self::Product(_) => RecordKind::Product,
            Self::Appointment(_) => RecordKind::Appointment,
        }
    }

    /// The normalized document of the contained record.
    pub fn to_document(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::User(r) => r.to_document(),
            Self::Product(r) => r.to_document(),
            Self::Appointment(r) => r.to_document(),
        }
    }

    /// The contained user, if this is one.
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(r) => Some(r),
            _ => None,
        }
    }

    /// The contained product, if this is one.
    pub fn as_product(&self) -> Option<&Product> {
        match self {
            Self::Product(r) => Some(r),
            _ => None,
        }
    }

    /// The contained appointment, if this is one.
    pub fn as_appointment(&self) -> Option<&Appointment> {
        match self {
            Self::Appointment(r) => Some(r),
            _ => None,
        }
    }
}
