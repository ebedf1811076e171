//! Derived aggregates: computed from [`CartState`] on demand, never stored.

use storefront_core::ProductId;

use crate::state::{CartLine, CartState};

pub fn items(state: &CartState) -> &[CartLine] {
    state.lines()
}

/// Sum of quantities across all lines, saturating at `i64::MAX`.
pub fn item_count(state: &CartState) -> i64 {
    state
        .lines()
        .iter()
        .fold(0i64, |count, line| count.saturating_add(line.qty))
}

/// `qty × unit price` for a single line, full precision.
pub fn line_total(line: &CartLine) -> f64 {
    line.qty as f64 * line.product.price
}

/// Sum of line totals, full precision. Round only when rendering.
pub fn total_price(state: &CartState) -> f64 {
    state
        .lines()
        .iter()
        .fold(0.0, |total, line| total + line_total(line))
}

pub fn line(state: &CartState, product_id: ProductId) -> Option<&CartLine> {
    state.lines().iter().find(|l| l.product_id() == product_id)
}

pub fn contains(state: &CartState, product_id: ProductId) -> bool {
    state.lines().iter().any(|l| l.product_id() == product_id)
}
