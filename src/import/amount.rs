//! Numbers as they appear in the exported ledgers.
//!
//! Exports mix `.` and `,` freely, so every `.` is first turned into a `,`. After that, the last
//! `,` is the decimal separator and any earlier `,` is treated as digit grouping and ignored.
//! So `1.234.567` is 1234.567, not 1234567. This doesn't depend on the host locale.

use rust_decimal::prelude::ToPrimitive as _;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ParseError;

pub fn parse_decimal(raw: &str) -> Result<Decimal, ParseError> {
    let cleaned = raw.replace('.', ",");
    parse_cleaned(cleaned.trim()).ok_or_else(|| ParseError::Decimal(raw.to_string()))
}

fn parse_cleaned(content: &str) -> Option<Decimal> {
    let (negative, unsigned) = match content.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, content.strip_prefix('+').unwrap_or(content)),
    };
    let (integer_part, fraction_part) = match unsigned.rsplit_once(',') {
        Some((integer_part, fraction_part)) => (integer_part.replace(',', ""), fraction_part),
        None => (unsigned.to_string(), ""),
    };
    if integer_part.is_empty() && fraction_part.is_empty() {
        return None;
    }
    if !is_digits(&integer_part) || !is_digits(fraction_part) {
        return None;
    }
    let integer_part = if integer_part.is_empty() {
        "0"
    } else {
        integer_part.as_str()
    };
    let literal = if fraction_part.is_empty() {
        integer_part.to_string()
    } else {
        format!("{integer_part}.{fraction_part}")
    };
    let value = Decimal::from_str_exact(&literal).ok()?;
    if negative && !value.is_zero() {
        Some(-value)
    } else {
        Some(value)
    }
}

fn is_digits(content: &str) -> bool {
    content.chars().all(|c| c.is_ascii_digit())
}

/// Same cleaning as [parse_decimal], floored towards negative infinity.
/// Anything that doesn't parse counts as zero, downstream filters rely on always getting a number.
pub fn parse_integer_floor(raw: &str) -> i64 {
    parse_decimal(raw)
        .ok()
        .and_then(|value| value.floor().to_i64())
        .unwrap_or(0)
}

/// Render with exactly two fractional digits and `,` as decimal separator, e.g. `1234,50`.
pub fn format_decimal_comma(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}").replace('.', ",")
}
