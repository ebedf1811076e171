//! Checkout: turn the current cart into a receipt and empty it.
//!
//! Demo-grade: no payment, no inventory reservation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::CartLine;
use crate::store::CartStore;

/// Snapshot of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub total_items: i64,
    pub total_price: f64,
}

/// Place an order for everything in the cart, then clear it.
///
/// An empty cart places nothing and returns `None`.
pub fn place_order(cart: &mut CartStore) -> Option<Receipt> {
    place_order_at(cart, Utc::now())
}

pub fn place_order_at(cart: &mut CartStore, placed_at: DateTime<Utc>) -> Option<Receipt> {
    if cart.state().is_empty() {
        tracing::debug!("checkout requested on an empty cart");
        return None;
    }

    let receipt = Receipt {
        id: Uuid::now_v7(),
        placed_at,
        lines: cart.items().to_vec(),
        total_items: cart.total_items(),
        total_price: cart.total_price(),
    };
    cart.clear();

    tracing::info!(
        receipt_id = %receipt.id,
        items = receipt.total_items,
        total = receipt.total_price,
        "order placed"
    );
    Some(receipt)
}
