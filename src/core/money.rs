use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Default number of decimals shown for amounts
pub const DEFAULT_DECIMAL_PLACES: u32 = 2;

/// Largest decimal count accepted from configuration
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Rounds an externally visible amount, half away from zero
pub fn round_money(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps negative inputs to zero
pub fn non_negative(amount: Decimal) -> Decimal {
    amount.max(Decimal::ZERO)
}

/// Formats an amount as `"<symbol> <value>"` with exactly `decimal_places` digits.
///
/// An empty symbol yields the bare number.
pub fn format_amount(symbol: &str, amount: Decimal, decimal_places: u32) -> String {
    let mut value = round_money(amount, decimal_places);
    value.rescale(decimal_places);

    // round_dp keeps the sign on values that round to zero
    if value.is_zero() {
        value.set_sign_positive(true);
    }

    let symbol = symbol.trim();
    if symbol.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", symbol, value)
    }
}

/// Parses a money-like string as typed into admin settings or forms.
///
/// Spaces are dropped and a decimal comma is accepted ("9 000,50" -> 9000.50).
/// Returns `None` for empty or non-numeric input.
pub fn parse_money(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Converts an amount to integer minor units (e.g. cents for 2 decimals)
pub fn to_minor_units(amount: Decimal, decimal_places: u32) -> Option<i64> {
    let factor = Decimal::from(10i64.checked_pow(decimal_places)?);
    let scaled = round_money(amount.checked_mul(factor)?, 0);
    scaled.to_i64()
}
