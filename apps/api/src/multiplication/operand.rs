//! Operand parsing for the multiplication endpoint.
//!
//! `parse_operand` is exact: optional surrounding whitespace, an optional `+`,
//! then ASCII digits only. `parse_operand_lossy` keeps the float-intermediate
//! behaviour older clients relied on: fractions are truncated and values past
//! 2^53 lose precision.

use num_bigint::BigUint;
use num_traits::FromPrimitive;

use crate::errors::EngineError;

/// Parses a non-negative decimal integer exactly, at any length.
pub fn parse_operand(raw: &str) -> Result<BigUint, EngineError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        return Err(negative(raw));
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_an_integer(raw));
    }

    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| not_an_integer(raw))
}

/// Parses through an `f64`, truncating toward zero. `"12.7"` → 12, `"1e3"` → 1000.
pub fn parse_operand_lossy(raw: &str) -> Result<BigUint, EngineError> {
    let value: f64 = raw.trim().parse().map_err(|_| not_an_integer(raw))?;
    if !value.is_finite() {
        return Err(not_an_integer(raw));
    }

    let truncated = value.trunc();
    if truncated < 0.0 {
        return Err(negative(raw));
    }

    BigUint::from_f64(truncated).ok_or_else(|| not_an_integer(raw))
}

fn not_an_integer(raw: &str) -> EngineError {
    EngineError::invalid(format!("'{raw}' is not a valid integer"))
}

fn negative(raw: &str) -> EngineError {
    EngineError::invalid(format!("'{raw}' is negative; only non-negative integers are supported"))
}
