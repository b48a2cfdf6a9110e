//! # Text Primitives
//!
//! Validated text newtypes shared by the record kinds, plus the length
//! check every bounded text field goes through.
//!
//! Lengths are counted in Unicode scalar values, never bytes, so
//! `"Zoë"` has length 3.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Rule;

/// Check that `value` has between `range.start()` and `range.end()`
/// characters, inclusive.
///
/// Pass `usize::MAX` as the end for text with only a lower bound.
pub fn check_length(value: &str, range: RangeInclusive<usize>) -> Result<(), Rule> {
    let length = value.chars().count();
    if length < *range.start() {
        return Err(Rule::TooShort {
            min: *range.start(),
        });
    }
    if length > *range.end() {
        return Err(Rule::TooLong { max: *range.end() });
    }
    Ok(())
}

/// Text with at least one non-whitespace character.
///
/// The value is stored exactly as given; surrounding whitespace is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Validate and construct from owned input.
    pub fn new(value: impl Into<String>) -> Result<Self, Rule> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Rule::Blank);
        }
        Ok(Self(value))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NonEmptyText> for String {
    fn from(value: NonEmptyText) -> Self {
        value.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = Rule;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Longest accepted address, per the SMTP path limit.
pub const EMAIL_MAX: usize = 254;
/// Longest accepted local part.
pub const EMAIL_LOCAL_MAX: usize = 64;
/// Longest accepted domain label.
pub const EMAIL_LABEL_MAX: usize = 63;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-atom local part; domain of letter/digit/hyphen labels with an
        // alphabetic top-level label. Letters and digits include non-ASCII.
        let pattern = r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@(?:[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?\.)+\p{L}(?:[\p{L}\p{N}-]*[\p{L}\p{N}])?$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// An email address with the standard `local@domain` structure.
///
/// ## Invariants
/// - Exactly one `@`, with a dot-atom local part of at most 64 characters.
/// - The domain has at least two labels and an alphabetic top-level label.
/// - At most 254 characters overall.
///
/// Internationalized addresses are accepted: letters and digits in both
/// parts may be any Unicode letters and digits (`josé@example.com`,
/// `user@münchen.de`). The address is kept exactly as given; no case
/// folding or IDNA encoding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct from owned input.
    pub fn new(value: impl Into<String>) -> Result<Self, Rule> {
        let value = value.into();
        if value.chars().count() > EMAIL_MAX || !email_regex().is_match(&value) {
            return Err(Rule::InvalidEmail);
        }
        match value.split_once('@') {
            Some((local, domain))
                if local.chars().count() <= EMAIL_LOCAL_MAX
                    && domain
                        .split('.')
                        .all(|label| label.chars().count() <= EMAIL_LABEL_MAX) =>
            {
                Ok(Self(value))
            }
            _ => Err(Rule::InvalidEmail),
        }
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or("", |(local, _)| local)
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = Rule;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_check_length_bounds_inclusive() {
        assert_eq!(check_length("123456", 7..=20), Err(Rule::TooShort { min: 7 }));
        assert!(check_length("1234567", 7..=20).is_ok());
        assert!(check_length(&"9".repeat(20), 7..=20).is_ok());
        assert_eq!(
            check_length(&"9".repeat(21), 7..=20),
            Err(Rule::TooLong { max: 20 })
        );
    }

    #[test]
    fn test_check_length_counts_chars() {
        // 2 chars, 3 bytes.
        assert!(check_length("Jö", 2..=usize::MAX).is_ok());
        assert!(check_length("ö", 2..=usize::MAX).is_err());
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(NonEmptyText::new("Cleaning").unwrap().as_str(), "Cleaning");
        assert_eq!(NonEmptyText::new(""), Err(Rule::Blank));
        assert_eq!(NonEmptyText::new(" \t\n"), Err(Rule::Blank));
    }

    #[test]
    fn test_non_empty_text_keeps_whitespace() {
        let text = NonEmptyText::new("  Whitening ").unwrap();
        assert_eq!(text.as_str(), "  Whitening ");
    }

    #[test]
    fn test_non_empty_text_serde() {
        let text: NonEmptyText = serde_json::from_str("\"Braces\"").unwrap();
        assert_eq!(text.to_string(), "Braces");
        assert!(serde_json::from_str::<NonEmptyText>("\"\"").is_err());
    }

    #[test]
    fn test_email_accepts_common_forms() {
        for addr in [
            "jane@example.com",
            "jane.doe+dental@mail.example.co.uk",
            "o'brien@clinic.ie",
            "x@a-b.io",
        ] {
            assert!(EmailAddress::new(addr).is_ok(), "rejected {addr}");
        }
    }

    #[test]
    fn test_email_accepts_internationalized() {
        for addr in [
            "josé@example.com",
            "user@münchen.de",
            "用户@例子.广告",
            "zoë.ng@clinic.ελ",
        ] {
            assert!(EmailAddress::new(addr).is_ok(), "rejected {addr}");
        }
        let email = EmailAddress::new("josé@münchen.de").unwrap();
        assert_eq!(email.local_part(), "josé");
        assert_eq!(email.domain(), "münchen.de");
    }

    #[test]
    fn test_email_rejects_malformed_internationalized() {
        for addr in [
            "josé@",
            "josé@münchen",
            "jo sé@example.com",
            "user@münchen.123",
            "user@-münchen.de",
            "user@münchen-.de",
        ] {
            assert_eq!(EmailAddress::new(addr), Err(Rule::InvalidEmail), "accepted {addr}");
        }
    }

    #[test]
    fn test_email_domain_label_limit() {
        let label = "ü".repeat(63);
        assert!(EmailAddress::new(format!("jane@{label}.de")).is_ok());
        let label = "ü".repeat(64);
        assert!(EmailAddress::new(format!("jane@{label}.de")).is_err());
    }

    #[test]
    fn test_email_local_limit_counts_chars() {
        let local = "é".repeat(64);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_ok());
        let local = "é".repeat(65);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_err());
    }

    #[test]
    fn test_email_rejects_malformed() {
        for addr in [
            "not-an-email",
            "",
            "@example.com",
            "jane@",
            "jane@localhost",
            "jane@@example.com",
            "jane doe@example.com",
            ".jane@example.com",
            "jane.@example.com",
            "ja..ne@example.com",
            "jane@-example.com",
            "jane@example.123",
        ] {
            assert_eq!(EmailAddress::new(addr), Err(Rule::InvalidEmail), "accepted {addr}");
        }
    }

    #[test]
    fn test_email_length_limits() {
        let local = "a".repeat(65);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_err());
        let local = "a".repeat(64);
        assert!(EmailAddress::new(format!("{local}@example.com")).is_ok());
        let long_domain = format!("{}.com", ["abcdefghij"; 25].join("."));
        assert!(EmailAddress::new(format!("jane@{long_domain}")).is_err());
    }

    #[test]
    fn test_email_parts() {
        let email = EmailAddress::new("jane@example.com").unwrap();
        assert_eq!(email.local_part(), "jane");
        assert_eq!(email.domain(), "example.com");
    }

    #[test]
    fn test_email_preserves_case() {
        let email = EmailAddress::new("Jane@Example.COM").unwrap();
        assert_eq!(email.as_str(), "Jane@Example.COM");
    }

    proptest! {
        #[test]
        fn length_within_range_accepted(s in "[a-z0-9 ]{7,20}") {
            prop_assert!(check_length(&s, 7..=20).is_ok());
        }

        #[test]
        fn length_above_range_rejected(s in "[a-z0-9]{21,40}") {
            prop_assert_eq!(check_length(&s, 7..=20), Err(Rule::TooLong { max: 20 }));
        }

        #[test]
        fn non_blank_text_accepted(s in "[ ]{0,3}[A-Za-z][A-Za-z ]{0,20}") {
            prop_assert!(NonEmptyText::new(s).is_ok());
        }
    }
}
