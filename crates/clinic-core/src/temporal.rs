//! # Temporal Types — Calendar Dates
//!
//! Defines `CalendarDate`, a date without time or zone, written on the
//! wire as `YYYY-MM-DD`.
//!
//! Only the extended ISO 8601 calendar form is accepted. Week dates,
//! ordinal dates, and datetimes are rejected at construction rather than
//! truncated, so a stored date always reads back exactly as written.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Rule;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date (`YYYY-MM-DD`).
///
/// # Construction
///
/// - [`CalendarDate::parse()`]: from a `YYYY-MM-DD` string.
/// - [`CalendarDate::from_ymd()`]: from numeric components.
/// - `From<NaiveDate>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Parse a date from its `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`Rule::InvalidDate`] if the string is not exactly four year
    /// digits, two month digits and two day digits naming a real date.
    pub fn parse(s: &str) -> Result<Self, Rule> {
        let bytes = s.as_bytes();
        let shape_ok = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shape_ok {
            return Err(Rule::InvalidDate);
        }
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| Rule::InvalidDate)
    }

    /// Build a date from year, month and day.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, Rule> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(Rule::InvalidDate)
    }

    /// Access the inner `NaiveDate`.
    pub fn as_date(&self) -> &NaiveDate {
        &self.0
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_iso8601()
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = Rule;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
