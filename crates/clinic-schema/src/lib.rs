//! # clinic-schema — Clinic Record Kinds
//!
//! Declares the three record kinds stored by the clinic application and
//! the validation each one applies at construction:
//!
//! | Kind | Collection | Purpose |
//! |------|------------|---------|
//! | [`User`] | `user` | Person-contact record |
//! | [`Product`] | `product` | Catalog item |
//! | [`Appointment`] | `appointment` | Scheduling request |
//!
//! ## Construction
//!
//! Every record is built from a raw `serde_json::Value` through
//! [`Record::from_raw`] (or [`RecordKind::validate`] when the kind is
//! only known at runtime). Construction either yields a record whose
//! fields all satisfy their rules, or a
//! [`ValidationError`](clinic_core::ValidationError) listing every
//! violated field. Records have no setters; a constructed record stays
//! valid.
//!
//! ## Schema Export (`export`)
//!
//! [`RecordKind::json_schema`] describes each kind as a Draft 2020-12
//! JSON Schema, carrying the field descriptions for the storage layer
//! and API clients.
//!
//! ## Documents (`document`)
//!
//! [`load_document`] reads JSON or YAML files into the raw value model.
//!
//! ## Crate Policy
//!
//! - Depends only on `clinic-core` internally.
//! - Wire field names are part of the stored document format and must not
//!   be renamed.

pub mod appointment;
pub mod document;
pub mod export;
pub mod product;
pub mod record;
pub mod status;
pub mod user;

pub use appointment::{Appointment, Note, PatientName, PhoneNumber};
pub use document::{into_batch, load_document, parse_document, DocumentFormat};
pub use product::{Price, Product};
pub use record::{Record, RecordKind, ValidatedRecord};
pub use status::AppointmentStatus;
pub use user::{Age, User};
