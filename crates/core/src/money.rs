//! Currency display helpers.
//!
//! Amounts are carried as `f64` in full precision everywhere in the domain.
//! Rounding to two decimals happens only when a value is rendered.

/// Render an amount as dollars with two decimals, e.g. `$36.50`.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
