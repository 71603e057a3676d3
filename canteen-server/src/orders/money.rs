//! Monetary arithmetic helpers
//!
//! Totals are stored as f64 for wire compatibility; all arithmetic goes
//! through `rust_decimal` to avoid drift, rounded to 2 decimal places on
//! the way back.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Apply a refund to a total: `max(0, total - amount)`
///
/// A refund larger than the remaining total floors at zero, never negative.
pub fn apply_refund(total: f64, amount: f64) -> f64 {
    let remaining = to_decimal(total) - to_decimal(amount);
    to_f64(remaining.max(Decimal::ZERO))
}
