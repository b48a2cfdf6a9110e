//! # Appointment Requests
//!
//! Scheduling-request record (`appointment` collection), submitted by
//! patients through the booking form and later moved through its
//! [`AppointmentStatus`] by the clinic.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use clinic_core::{
    check_length, CalendarDate, EmailAddress, FieldReader, NonEmptyText, Rule, ValidationError,
    ValidationOptions,
};

use crate::record::{Record, RecordKind};
use crate::status::AppointmentStatus;

/// Shortest accepted patient name.
pub const PATIENT_NAME_MIN: usize = 2;
/// Shortest accepted phone number.
pub const PHONE_MIN: usize = 7;
/// Longest accepted phone number.
pub const PHONE_MAX: usize = 20;
/// Longest accepted note.
pub const NOTE_MAX: usize = 500;

/// Declares a text newtype whose only rule is a character-count range.
macro_rules! length_bounded_text {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, Rule> {
                let value = value.into();
                check_length(&value, $min..=$max)?;
                Ok(Self(value))
            }

            /// Borrow the text.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = Rule;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

length_bounded_text!(
    /// Patient full name, at least 2 characters.
    PatientName,
    PATIENT_NAME_MIN,
    usize::MAX
);

length_bounded_text!(
    /// Contact phone number, 7 to 20 characters. Digits are not checked.
    PhoneNumber,
    PHONE_MIN,
    PHONE_MAX
);

length_bounded_text!(
    /// Free-text note from the patient, at most 500 characters.
    Note,
    0,
    NOTE_MAX
);

/// A patient's request for an appointment.
///
/// ## Invariants
/// - `patient_name` has at least 2 characters.
/// - `email`, when present, has the `local@domain` structure.
/// - `phone` has 7 to 20 characters.
/// - `service` has at least one non-whitespace character.
/// - `preferred_date` is a real calendar date.
/// - `message`, when present, has at most 500 characters.
/// - `status` is one of the four [`AppointmentStatus`] values and defaults
///   to `pending` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Appointment {
    patient_name: PatientName,
    email: Option<EmailAddress>,
    phone: PhoneNumber,
    service: NonEmptyText,
    preferred_date: CalendarDate,
    preferred_time: String,
    message: Option<Note>,
    status: AppointmentStatus,
}

impl Appointment {
    /// Patient full name.
    pub fn patient_name(&self) -> &PatientName {
        &self.patient_name
    }

    /// Contact email, if provided.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// Contact phone.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Requested dental service.
    pub fn service(&self) -> &NonEmptyText {
        &self.service
    }

    /// Preferred appointment date.
    pub fn preferred_date(&self) -> CalendarDate {
        self.preferred_date
    }

    /// Preferred time slot as written by the patient, e.g. `10:30 AM`.
    pub fn preferred_time(&self) -> &str {
        &self.preferred_time
    }

    /// Additional notes, if provided.
    pub fn message(&self) -> Option<&Note> {
        self.message.as_ref()
    }

    /// Current status.
    pub fn status(&self) -> AppointmentStatus {
        self.status
    }
}

impl Record for Appointment {
    const KIND: RecordKind = RecordKind::Appointment;

    fn from_raw(raw: &Value, options: &ValidationOptions) -> Result<Self, ValidationError> {
        let mut reader = FieldReader::new(Self::KIND.type_name(), raw, options);
        let patient_name = reader.required_text("patient_name", PatientName::new);
        let email = reader.optional_text("email", EmailAddress::new);
        let phone = reader.required_text("phone", PhoneNumber::new);
        let service = reader.required_text("service", NonEmptyText::new);
        let preferred_date = reader.required_date("preferred_date");
        let preferred_time = reader.required_text("preferred_time", Ok);
        let message = reader.optional_text("message", Note::new);
        let status = reader.text_or(
            "status",
            AppointmentStatus::default(),
            AppointmentStatus::parse_field,
        );

        reader.finish(move || {
            Some(Self {
                patient_name: patient_name?,
                email: email?,
                phone: phone?,
                service: service?,
                preferred_date: preferred_date?,
                preferred_time: preferred_time?,
                message: message?,
                status: status?,
            })
        })
    }
}

impl TryFrom<Value> for Appointment {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        Self::from_raw(&raw, &ValidationOptions::default())
    }
}
