//! # Numeric Bounds
//!
//! Inclusive range checks for integer and floating-point fields.

use std::ops::RangeInclusive;

use crate::error::Rule;

/// Check that `value` lies within `range`, inclusive on both ends.
pub fn check_int_range(value: i64, range: RangeInclusive<i64>) -> Result<i64, Rule> {
    if value < *range.start() {
        return Err(Rule::TooSmall {
            min: *range.start() as f64,
        });
    }
    if value > *range.end() {
        return Err(Rule::TooLarge {
            max: *range.end() as f64,
        });
    }
    Ok(value)
}

/// Check that a finite `value` is at least `min`.
pub fn check_at_least(value: f64, min: f64) -> Result<f64, Rule> {
    if !value.is_finite() {
        return Err(Rule::NotFinite);
    }
    if value < min {
        return Err(Rule::TooSmall { min });
    }
    Ok(value)
}
