//! Common utility functions for deduction calculations.
//!
//! This module provides the answer extractor shared by every section
//! calculator, plus checked arithmetic and rounding helpers.

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::CalculationError;
use crate::models::SubAnswer;

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fradrag_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Parses a user-entered amount.
///
/// Commas are thousands separators and surrounding whitespace is ignored.
/// Empty or unparseable input is `0`; an answer with a typo must not sink
/// the rest of the report.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fradrag_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("1,234.50"), dec!(1234.5));
/// assert_eq!(parse_amount(""), dec!(0));
/// assert_eq!(parse_amount("abc"), dec!(0));
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    let normalized = s.trim().replace(',', "");
    if normalized.is_empty() {
        return Decimal::ZERO;
    }
    normalized.parse().unwrap_or_else(|e| {
        debug!(input = %s, "unparseable amount treated as zero: {}", e);
        Decimal::ZERO
    })
}

/// Reads `field` from the first entry that has it and parses it with
/// [`parse_amount`]. A missing field is `0`.
pub fn extract_expense(
    entries: &[SubAnswer],
    field: &str,
) -> Decimal {
    entries
        .iter()
        .find_map(|entry| entry.get(field))
        .map(parse_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Adds up `field` over every entry that has it (repeated groups such as
/// several loans).
pub fn sum_expenses(
    entries: &[SubAnswer],
    field: &'static str,
) -> Result<Decimal, CalculationError> {
    entries
        .iter()
        .filter_map(|entry| entry.get(field))
        .map(parse_amount)
        .try_fold(Decimal::ZERO, |total, amount| add(total, amount, field))
}

/// True when the first value of a selector field is `yes`, ignoring case.
pub fn is_yes(
    entries: &[SubAnswer],
    field: &str,
) -> bool {
    entries
        .iter()
        .find_map(|entry| entry.get(field))
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("yes"))
}

/// `min(amount × rate, cap)`.
pub fn capped_share(
    amount: Decimal,
    rate: Decimal,
    cap: Decimal,
    context: &'static str,
) -> Result<Decimal, CalculationError> {
    Ok(mul(amount, rate, context)?.min(cap))
}

pub fn add(
    a: Decimal,
    b: Decimal,
    context: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_add(b)
        .ok_or(CalculationError::Overflow { context })
}

pub fn sub(
    a: Decimal,
    b: Decimal,
    context: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_sub(b)
        .ok_or(CalculationError::Overflow { context })
}

pub fn mul(
    a: Decimal,
    b: Decimal,
    context: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_mul(b)
        .ok_or(CalculationError::Overflow { context })
}
