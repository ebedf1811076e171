use serde::{Deserialize, Serialize};

use storefront_core::{ProductId, Reducer};
use storefront_products::Product;

/// Cart line: a product and how many of it.
///
/// Lines held in a [`CartState`] always have `qty >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub qty: i64,
}

impl CartLine {
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }
}

/// Ordered cart contents, at most one line per product.
///
/// Serialized as `{ "items": [{ "product": .., "qty": .. }] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartLine>,
}

impl CartState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|l| l.product_id() == product_id)
    }

    fn without(&self, index: usize) -> Self {
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, l)| l.clone())
            .collect();
        Self { items }
    }

    fn with_qty(&self, index: usize, qty: i64) -> Self {
        let mut items = self.items.clone();
        items[index].qty = qty;
        Self { items }
    }
}

fn default_qty() -> i64 {
    1
}

/// A request to change the cart.
///
/// Tagged the same way the storefront's UI events are named, so intents can
/// be logged and replayed as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CartIntent {
    /// Add `qty` (may be negative) of a product.
    #[serde(rename = "ADD_ITEM")]
    Add {
        product: Product,
        #[serde(default = "default_qty")]
        qty: i64,
    },
    #[serde(rename = "REMOVE_ITEM")]
    Remove {
        #[serde(rename = "productId")]
        product_id: ProductId,
    },
    /// Set an absolute quantity for a product already in the cart.
    #[serde(rename = "UPDATE_QTY")]
    SetQuantity {
        #[serde(rename = "productId")]
        product_id: ProductId,
        qty: i64,
    },
    #[serde(rename = "CLEAR_CART")]
    Clear,
}

impl CartIntent {
    pub fn add(product: Product) -> Self {
        Self::Add { product, qty: 1 }
    }

    /// Decode an externally supplied intent.
    ///
    /// Unknown intent types and malformed payloads yield `None`.
    pub fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(intent) => Some(intent),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unrecognized cart intent");
                None
            }
        }
    }
}

impl Reducer for CartState {
    type Intent = CartIntent;

    fn reduce(&self, intent: &CartIntent) -> Self {
        match intent {
            CartIntent::Add { product, qty } => match self.position(product.id) {
                Some(index) => {
                    let next_qty = self.items[index].qty.saturating_add(*qty);
                    if next_qty <= 0 {
                        self.without(index)
                    } else {
                        self.with_qty(index, next_qty)
                    }
                }
                // Non-positive adds never create a line.
                None if *qty <= 0 => self.clone(),
                None => {
                    let mut items = self.items.clone();
                    items.push(CartLine {
                        product: product.clone(),
                        qty: *qty,
                    });
                    Self { items }
                }
            },
            CartIntent::Remove { product_id } => match self.position(*product_id) {
                Some(index) => self.without(index),
                None => self.clone(),
            },
            CartIntent::SetQuantity { product_id, qty } => match self.position(*product_id) {
                None => self.clone(),
                Some(index) if *qty <= 0 => self.without(index),
                Some(index) => self.with_qty(index, *qty),
            },
            CartIntent::Clear => Self::empty(),
        }
    }
}
