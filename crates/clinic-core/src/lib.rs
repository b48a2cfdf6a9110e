//! # clinic-core — Foundational Types for Clinic Records
//!
//! This crate is the leaf of the clinic workspace. It defines the
//! primitives every record kind is built from and the error vocabulary
//! every validation failure is expressed in. It depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Collect, never short-circuit.** [`FieldReader`] checks every field
//!    of a raw document independently and accumulates a [`Violation`] for
//!    each failure. A rejected document reports all of its problems at once.
//!
//! 2. **Validated newtypes.** [`NonEmptyText`], [`EmailAddress`] and
//!    [`CalendarDate`] can only be obtained through their checking
//!    constructors. Holding one is proof the check passed.
//!
//! 3. **Absence is `Option`.** Optional fields are `Option<T>`. There are
//!    no sentinel values for "not provided".
//!
//! 4. **Coercion is explicit.** How raw JSON types map onto field types is
//!    governed by [`ValidationOptions`], with a lax default and a strict mode.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `clinic-*` crates.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod collection;
pub mod error;
pub mod field;
pub mod numeric;
pub mod options;
pub mod temporal;
pub mod text;

// Re-export primary types for ergonomic imports.
pub use collection::collection_name;
pub use error::{ClinicError, Rule, ValidationError, Violation, Violations};
pub use field::{FieldReader, FieldType};
pub use numeric::{check_at_least, check_int_range};
pub use options::{Coercion, ValidationOptions};
pub use temporal::CalendarDate;
pub use text::{check_length, EmailAddress, NonEmptyText};
