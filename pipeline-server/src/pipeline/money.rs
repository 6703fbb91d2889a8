//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done with `Decimal` internally and converted
//! back to `f64` for storage on the order. Every stored figure is rounded
//! to 2 decimal places half-up at the moment it is computed; later filters
//! read already-rounded values.

use rust_decimal::prelude::*;
use shared::Order;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
///
/// Non-finite input cannot occur for values produced by the pipeline
/// itself; if one arrives through caller-supplied data it is logged and
/// treated as zero rather than corrupting the run.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a monetary f64 to 2 decimal places
#[inline]
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum of all discount amounts applied to the order so far
pub fn discount_total(order: &Order) -> Decimal {
    order
        .discounts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|d| d.amount)
        .map(to_decimal)
        .sum()
}

/// Recompute the order total: `subtotal - discounts + shipping + taxes`
///
/// Reads whatever has been set so far (absent fields count as zero), so
/// the filter that runs last produces the authoritative total.
pub fn recompute_total(order: &Order) -> f64 {
    let subtotal = to_decimal(order.subtotal.unwrap_or(0.0));
    let shipping = to_decimal(order.shipping.unwrap_or(0.0));
    let taxes = to_decimal(order.taxes.unwrap_or(0.0));
    to_f64(subtotal - discount_total(order) + shipping + taxes)
}
