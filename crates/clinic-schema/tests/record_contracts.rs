//! Validation contract tests across all record kinds.
//!
//! Covers construction from raw documents end to end: valid documents
//! survive unchanged, every missing required field is reported, numeric
//! and length boundaries are inclusive, and the status enumeration is
//! closed.

use clinic_core::{Coercion, FieldType, Rule, ValidationOptions};
use clinic_schema::{
    Appointment, AppointmentStatus, Product, Record, RecordKind, User, ValidatedRecord,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn lax() -> ValidationOptions {
    ValidationOptions::default()
}

fn strict() -> ValidationOptions {
    ValidationOptions::strict()
}

fn full_user() -> Value {
    json!({
        "name": "Grace Hopper",
        "email": "grace@example.com",
        "address": "1 Navy Yard, Arlington",
        "age": 85,
        "is_active": true
    })
}

fn full_product() -> Value {
    json!({
        "title": "Whitening kit",
        "description": "Two-week course",
        "price": 49.99,
        "category": "Cosmetic",
        "in_stock": false
    })
}

fn full_appointment() -> Value {
    json!({
        "patient_name": "Li Wei",
        "email": "li.wei@example.org",
        "phone": "0044 20 7946 0958",
        "service": "Root canal",
        "preferred_date": "2026-12-01",
        "preferred_time": "2:15 PM",
        "message": "Sensitive to cold",
        "status": "completed"
    })
}

fn sample(kind: RecordKind) -> Value {
    match kind {
        RecordKind::User => full_user(),
        RecordKind::Product => full_product(),
        RecordKind::Appointment => full_appointment(),
    }
}

fn required_fields(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::User => &["name", "email", "address"],
        RecordKind::Product => &["title", "price", "category"],
        RecordKind::Appointment => &[
            "patient_name",
            "phone",
            "service",
            "preferred_date",
            "preferred_time",
        ],
    }
}

// ---- round-trip identity ----

#[test]
fn fully_populated_documents_survive_unchanged() {
    for kind in RecordKind::all() {
        for opts in [lax(), strict()] {
            let raw = sample(*kind);
            let record = kind.validate(&raw, &opts).unwrap();
            assert_eq!(record.to_document().unwrap(), raw, "{kind} ({})", opts.coercion);
        }
    }
}

#[test]
fn typed_accessors_match_input() {
    let user = User::from_raw(&full_user(), &lax()).unwrap();
    assert_eq!(user.name().as_str(), "Grace Hopper");
    assert_eq!(user.age().map(|a| a.get()), Some(85));

    let product = Product::from_raw(&full_product(), &lax()).unwrap();
    assert_eq!(product.price().get(), 49.99);

    let appt = Appointment::from_raw(&full_appointment(), &lax()).unwrap();
    assert_eq!(appt.status(), AppointmentStatus::Completed);
    assert_eq!(appt.preferred_date().to_string(), "2026-12-01");
}

// ---- presence ----

#[test]
fn each_missing_required_field_is_reported() {
    for kind in RecordKind::all() {
        for field in required_fields(*kind) {
            let mut raw = sample(*kind);
            raw.as_object_mut().unwrap().remove(*field);
            let err = kind.validate(&raw, &lax()).unwrap_err();
            assert_eq!(err.rule_for(field), Some(&Rule::Missing), "{kind}.{field}");
            assert_eq!(err.violations().len(), 1, "{kind}.{field}");
        }
    }
}

#[test]
fn empty_document_reports_every_required_field() {
    for kind in RecordKind::all() {
        let err = kind.validate(&json!({}), &lax()).unwrap_err();
        assert_eq!(err.violations().len(), required_fields(*kind).len(), "{kind}");
        for field in required_fields(*kind) {
            assert!(err.has_violation(field), "{kind}.{field}");
        }
    }
}

#[test]
fn non_object_input_rejected_at_root() {
    for raw in [json!(null), json!("user"), json!(42), json!([full_user()])] {
        let err = RecordKind::User.validate(&raw, &lax()).unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations().violations()[0].rule, Rule::NotAnObject);
    }
}

#[test]
fn absent_optionals_are_accepted() {
    let user = json!({"name": "A", "email": "", "address": ""});
    assert!(User::from_raw(&user, &strict()).unwrap().age().is_none());

    let product = json!({"title": "T", "price": 1, "category": "C"});
    assert!(Product::from_raw(&product, &strict()).unwrap().description().is_none());

    let mut appt = full_appointment();
    let fields = appt.as_object_mut().unwrap();
    fields.remove("email");
    fields.remove("message");
    fields.remove("status");
    let appt = Appointment::from_raw(&appt, &strict()).unwrap();
    assert!(appt.email().is_none());
    assert!(appt.message().is_none());
    assert_eq!(appt.status(), AppointmentStatus::Pending);
}

// ---- boundaries ----

#[test]
fn age_boundaries() {
    for (age, accepted) in [(-1, false), (0, true), (120, true), (121, false)] {
        let mut raw = full_user();
        raw["age"] = json!(age);
        assert_eq!(User::from_raw(&raw, &lax()).is_ok(), accepted, "age {age}");
    }
}

#[test]
fn price_boundaries() {
    let mut raw = full_product();
    raw["price"] = json!(-0.01);
    let err = Product::from_raw(&raw, &lax()).unwrap_err();
    assert_eq!(err.rule_for("price"), Some(&Rule::TooSmall { min: 0.0 }));

    raw["price"] = json!(0);
    assert!(Product::from_raw(&raw, &lax()).is_ok());
    raw["price"] = json!(0.0);
    assert!(Product::from_raw(&raw, &strict()).is_ok());
}

#[test]
fn status_is_closed() {
    let mut raw = full_appointment();
    raw["status"] = json!("archived");
    let err = Appointment::from_raw(&raw, &lax()).unwrap_err();
    assert!(matches!(err.rule_for("status"), Some(Rule::NotAllowed { .. })));

    raw.as_object_mut().unwrap().remove("status");
    let appt = Appointment::from_raw(&raw, &lax()).unwrap();
    assert_eq!(appt.status(), AppointmentStatus::Pending);
    assert_eq!(appt.to_document().unwrap()["status"], "pending");
}

#[test]
fn email_checked_only_when_present() {
    let mut raw = full_appointment();
    raw["email"] = json!("not-an-email");
    let err = Appointment::from_raw(&raw, &lax()).unwrap_err();
    assert_eq!(err.rule_for("email"), Some(&Rule::InvalidEmail));

    raw.as_object_mut().unwrap().remove("email");
    assert!(Appointment::from_raw(&raw, &lax()).is_ok());
}

#[test]
fn internationalized_email_accepted() {
    for email in ["josé@example.com", "user@münchen.de"] {
        let mut raw = full_appointment();
        raw["email"] = json!(email);
        let appt = Appointment::from_raw(&raw, &strict()).unwrap();
        assert_eq!(appt.email().map(|e| e.as_str()), Some(email));
        assert_eq!(appt.to_document().unwrap()["email"], email);
    }
}

// ---- coercion ----

#[test]
fn lax_coercion_normalizes_values() {
    let raw = json!({
        "name": "Ann",
        "email": "ann@example.com",
        "address": "2 Elm St",
        "age": "30",
        "is_active": "no"
    });
    let user = User::from_raw(&raw, &lax()).unwrap();
    let doc = user.to_document().unwrap();
    assert_eq!(doc["age"], 30);
    assert_eq!(doc["is_active"], false);
}

#[test]
fn strict_coercion_rejects_strings_for_numbers_and_flags() {
    let raw = json!({
        "name": "Ann",
        "email": "ann@example.com",
        "address": "2 Elm St",
        "age": "30",
        "is_active": "no"
    });
    let err = User::from_raw(&raw, &strict()).unwrap_err();
    assert_eq!(
        err.rule_for("age"),
        Some(&Rule::WrongType {
            expected: FieldType::Integer
        })
    );
    assert_eq!(
        err.rule_for("is_active"),
        Some(&Rule::WrongType {
            expected: FieldType::Boolean
        })
    );
}

#[test]
fn text_fields_reject_non_strings_in_any_mode() {
    let mut raw = full_product();
    raw["title"] = json!(123);
    for opts in [lax(), strict()] {
        let err = Product::from_raw(&raw, &opts).unwrap_err();
        assert_eq!(
            err.rule_for("title"),
            Some(&Rule::WrongType {
                expected: FieldType::Text
            })
        );
    }
}

#[test]
fn unknown_fields_follow_options() {
    let mut raw = full_product();
    raw["sku"] = json!("WK-14");
    assert!(Product::from_raw(&raw, &lax()).is_ok());

    let opts = lax().with_coercion(Coercion::Lax).with_deny_unknown_fields(true);
    let err = Product::from_raw(&raw, &opts).unwrap_err();
    assert_eq!(err.rule_for("sku"), Some(&Rule::UnknownField));
}

// ---- serde integration ----

#[test]
fn deserializing_records_runs_validation() {
    let appt: Appointment = serde_json::from_value(full_appointment()).unwrap();
    assert_eq!(appt.patient_name().as_str(), "Li Wei");

    let mut raw = full_appointment();
    raw["phone"] = json!("123");
    let err = serde_json::from_value::<Appointment>(raw).unwrap_err();
    assert!(err.to_string().contains("phone"));
}

#[test]
fn validated_record_kind_matches_dispatch() {
    for kind in RecordKind::all() {
        let record = kind.validate(&sample(*kind), &lax()).unwrap();
        assert_eq!(record.kind(), *kind);
        let matches_variant = match &record {
            ValidatedRecord::User(_) => *kind == RecordKind::User,
            ValidatedRecord::Product(_) => *kind == RecordKind::Product,
            ValidatedRecord::Appointment(_) => *kind == RecordKind::Appointment,
        };
        assert!(matches_variant);
    }
}

#[test]
fn validation_is_deterministic_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                RecordKind::Appointment
                    .validate(&full_appointment(), &ValidationOptions::default())
                    .map(|r| r.to_document().ok())
                    .ok()
                    .flatten()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(full_appointment()));
    }
}

proptest! {
    #[test]
    fn any_age_in_range_accepted(age in 0i64..=120) {
        let mut raw = full_user();
        raw["age"] = json!(age);
        let user = User::from_raw(&raw, &strict()).unwrap();
        prop_assert_eq!(user.age().map(|a| i64::from(a.get())), Some(age));
    }

    #[test]
    fn any_age_out_of_range_rejected(
        age in prop_oneof![i64::MIN..0i64, 121i64..=i64::MAX]
    ) {
        let mut raw = full_user();
        raw["age"] = json!(age);
        let err = User::from_raw(&raw, &strict()).unwrap_err();
        prop_assert!(err.has_violation("age"));
    }

    #[test]
    fn any_non_negative_price_accepted(price in 0.0f64..1.0e9) {
        let mut raw = full_product();
        raw["price"] = json!(price);
        let product = Product::from_raw(&raw, &strict()).unwrap();
        prop_assert_eq!(product.price().get(), price);
    }

    #[test]
    fn any_negative_price_rejected(price in -1.0e9f64..-1.0e-9) {
        let mut raw = full_product();
        raw["price"] = json!(price);
        prop_assert!(Product::from_raw(&raw, &strict()).is_err());
    }

    #[test]
    fn unknown_status_strings_rejected(status in "[a-z]{1,12}") {
        prop_assume!(!["pending", "confirmed", "completed", "cancelled"].contains(&status.as_str()));
        let mut raw = full_appointment();
        raw["status"] = json!(status);
        let err = Appointment::from_raw(&raw, &lax()).unwrap_err();
        prop_assert!(err.has_violation("status"));
    }
}
