//! # JSON Schema Export
//!
//! Describes each record kind as a JSON Schema (Draft 2020-12) document
//! for the storage layer and API clients.
//!
//! The exported schema describes the *normalized* document shape, the
//! one [`Record::to_document`](crate::Record::to_document) produces.
//! Structural rules (required fields, types, lengths, bounds, the status
//! enumeration) match the validator exactly. Lax coercions, such as a
//! numeric string for `age`, are accepted by the validator but not by the
//! schema. `format` keywords are annotations; shapes they imply are also
//! spelled out as `pattern` where the validator enforces them.

use serde_json::{json, Value};

use crate::appointment::{NOTE_MAX, PATIENT_NAME_MIN, PHONE_MAX, PHONE_MIN};
use crate::record::RecordKind;
use crate::status::STATUS_NAMES;
use crate::user::AGE_MAX;

/// JSON Schema dialect of every exported schema.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Pattern requiring at least one non-whitespace character.
const NON_BLANK_PATTERN: &str = r"\S";

/// Shape of a `YYYY-MM-DD` date. Calendar validity is left to `format`.
const DATE_PATTERN: &str = "^[0-9]{4}-[0-9]{2}-[0-9]{2}$";

impl RecordKind {
    /// The JSON Schema of this kind's normalized document.
    pub fn json_schema(&self) -> Value {
        let (description, properties, required) = match self {
            Self::User => (
                "Person-contact record.",
                user_properties(),
                json!(["name", "email", "address"]),
            ),
            Self::Product => (
                "Catalog item.",
                product_properties(),
                json!(["title", "price", "category"]),
            ),
            Self::Appointment => (
                "Appointment request from a patient.",
                appointment_properties(),
                json!([
                    "patient_name",
                    "phone",
                    "service",
                    "preferred_date",
                    "preferred_time"
                ]),
            ),
        };

        json!({
            "$schema": SCHEMA_DIALECT,
            "$id": format!("urn:clinic:schema:{}", self.collection()),
            "title": self.type_name(),
            "description": format!("{description} Collection: {}", self.collection()),
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn non_blank_text(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "pattern": NON_BLANK_PATTERN,
        "description": description,
    })
}

fn user_properties() -> Value {
    json!({
        "name": non_blank_text("Full name"),
        "email": {"type": "string", "description": "Email address"},
        "address": {"type": "string", "description": "Address"},
        "age": {
            "type": ["integer", "null"],
            "minimum": 0,
            "maximum": AGE_MAX,
            "description": "Age in years",
        },
        "is_active": {
            "type": "boolean",
            "default": true,
            "description": "Whether user is active",
        },
    })
}

fn product_properties() -> Value {
    json!({
        "title": non_blank_text("Product title"),
        "description": {"type": ["string", "null"], "description": "Product description"},
        "price": {"type": "number", "minimum": 0, "description": "Price in dollars"},
        "category": non_blank_text("Product category"),
        "in_stock": {
            "type": "boolean",
            "default": true,
            "description": "Whether product is in stock",
        },
    })
}

fn appointment_properties() -> Value {
    json!({
        "patient_name": {
            "type": "string",
            "minLength": PATIENT_NAME_MIN,
            "description": "Patient full name",
        },
        "email": {
            "type": ["string", "null"],
            "format": "idn-email",
            "description": "Contact email",
        },
        "phone": {
            "type": "string",
            "minLength": PHONE_MIN,
            "maxLength": PHONE_MAX,
            "description": "Contact phone",
        },
        "service": non_blank_text("Requested dental service"),
        "preferred_date": {
            "type": "string",
            "pattern": DATE_PATTERN,
            "format": "date",
            "description": "Preferred appointment date",
        },
        "preferred_time": {
            "type": "string",
            "description": "Preferred time slot, e.g., 10:30 AM",
        },
        "message": {
            "type": ["string", "null"],
            "maxLength": NOTE_MAX,
            "description": "Additional notes",
        },
        "status": {
            "type": "string",
            "enum": STATUS_NAMES,
            "default": "pending",
            "description": "Appointment status",
        },
    })
}
