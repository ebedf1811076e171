//! State-access facade.
//!
//! [`CartStore`] bundles the current state, the derived aggregates and intent
//! dispatch. [`CartProvider`] owns the store for an explicit scope
//! (`mount` .. `teardown`) and is passed to consumers; there is no global.

use storefront_core::{ProductId, Reducer};
use storefront_products::Product;

use crate::persistence::CartPersistence;
use crate::selectors;
use crate::state::{CartIntent, CartLine, CartState};

/// Misuse of the cart API. Not recoverable; indicates a wiring bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgrammingError {
    #[error("use_cart must be used inside a mounted CartProvider")]
    OutsideProvider,
}

/// The cart handle consumers work with.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    persistence: CartPersistence,
}

impl CartStore {
    /// Start from the persisted cart, or empty when nothing usable is stored.
    pub fn init(persistence: CartPersistence) -> Self {
        let state = persistence.load().unwrap_or_default();
        tracing::info!(
            lines = state.lines().len(),
            items = selectors::item_count(&state),
            "cart initialized"
        );
        Self { state, persistence }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartLine] {
        selectors::items(&self.state)
    }

    pub fn total_items(&self) -> i64 {
        selectors::item_count(&self.state)
    }

    pub fn total_price(&self) -> f64 {
        selectors::total_price(&self.state)
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        selectors::line(&self.state, product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        selectors::contains(&self.state, product_id)
    }

    /// Apply `intent`; persist when the state actually changed.
    pub fn dispatch(&mut self, intent: CartIntent) -> &CartState {
        let next = self.state.reduce(&intent);
        if next != self.state {
            tracing::debug!(?intent, "cart changed");
            self.state = next;
            self.persistence.save(&self.state);
        }
        &self.state
    }

    /// Dispatch a JSON-encoded intent. Unrecognized intents leave the cart as is.
    pub fn dispatch_json(&mut self, raw: &str) -> &CartState {
        match CartIntent::decode(raw) {
            Some(intent) => self.dispatch(intent),
            None => {
                tracing::warn!("unrecognized cart intent; state unchanged");
                &self.state
            }
        }
    }

    pub fn add(&mut self, product: Product, qty: i64) -> &CartState {
        self.dispatch(CartIntent::Add { product, qty })
    }

    pub fn remove(&mut self, product_id: ProductId) -> &CartState {
        self.dispatch(CartIntent::Remove { product_id })
    }

    pub fn set_qty(&mut self, product_id: ProductId, qty: i64) -> &CartState {
        self.dispatch(CartIntent::SetQuantity { product_id, qty })
    }

    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartIntent::Clear)
    }
}

/// Owns the cart for the lifetime of the application scope.
#[derive(Debug, Default)]
pub struct CartProvider {
    store: Option<CartStore>,
}

impl CartProvider {
    /// An unmounted provider; `use_cart` fails until `mount` is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a store backed by `persistence`, replacing any previous one.
    pub fn mount(&mut self, persistence: CartPersistence) -> &mut CartStore {
        self.store.insert(CartStore::init(persistence))
    }

    /// End the scope and hand back the store, if any.
    pub fn teardown(&mut self) -> Option<CartStore> {
        self.store.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    pub fn use_cart(&self) -> Result<&CartStore, ProgrammingError> {
        self.store.as_ref().ok_or(ProgrammingError::OutsideProvider)
    }

    pub fn use_cart_mut(&mut self) -> Result<&mut CartStore, ProgrammingError> {
        self.store.as_mut().ok_or(ProgrammingError::OutsideProvider)
    }
}
