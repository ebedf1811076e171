//! Shopping cart: pure transitions, derived aggregates, persistence and the
//! state-access facade.
//!
//! The reducer and selectors are deterministic domain logic (no IO). IO lives
//! in [`persistence`] and is only driven by [`store::CartStore`].

pub mod checkout;
pub mod persistence;
pub mod selectors;
pub mod state;
pub mod store;

pub use checkout::{Receipt, place_order, place_order_at};
pub use persistence::{
    CART_STORAGE_KEY, CartPersistence, FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore,
    PersistenceError,
};
pub use state::{CartIntent, CartLine, CartState};
pub use store::{CartProvider, CartStore, ProgrammingError};
