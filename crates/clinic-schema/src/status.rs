//! # Appointment Status
//!
//! Defines the closed set of states an appointment request can be in.
//! The enum is the only representation; an arbitrary string can never
//! reach a constructed [`Appointment`](crate::Appointment).
//!
//! | Status | Meaning |
//! |--------|---------|
//! | `pending` | Requested, not yet confirmed by the clinic (default) |
//! | `confirmed` | Slot agreed with the patient |
//! | `completed` | Visit took place |
//! | `cancelled` | Withdrawn by either side |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use clinic_core::Rule;

/// Wire names of every status, in declaration order.
pub const STATUS_NAMES: &[&str] = &["pending", "confirmed", "completed", "cancelled"];

/// Lifecycle state of an appointment request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Requested, awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by the clinic.
    Confirmed,
    /// The visit took place.
    Completed,
    /// Withdrawn.
    Cancelled,
}

impl AppointmentStatus {
    /// Returns all statuses in declaration order.
    pub fn all() -> &'static [AppointmentStatus] {
        &[
            Self::Pending,
            Self::Confirmed,
            Self::Completed,
            Self::Cancelled,
        ]
    }

    /// Returns the wire name. Matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a raw field value; the check used by appointment validation.
    pub fn parse_field(value: String) -> Result<Self, Rule> {
        value.parse()
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = Rule;

    /// Exact, case-sensitive match on the wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Rule::NotAllowed {
                allowed: STATUS_NAMES,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }

    #[test]
    fn test_names_match_variants() {
        let names: Vec<&str> = AppointmentStatus::all().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, STATUS_NAMES);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for status in AppointmentStatus::all() {
            let parsed: AppointmentStatus = status.as_str().parse().unwrap();
            assert_eq!(*status, parsed);
        }
    }

    #[test]
    fn test_from_str_rejects_outside_set() {
        for s in ["archived", "Pending", "PENDING", " pending", "", "canceled"] {
            let err = s.parse::<AppointmentStatus>().unwrap_err();
            assert_eq!(
                err,
                Rule::NotAllowed {
                    allowed: STATUS_NAMES
                },
                "accepted {s:?}"
            );
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for status in AppointmentStatus::all() {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert!(serde_json::from_str::<AppointmentStatus>("\"archived\"").is_err());
    }
}
