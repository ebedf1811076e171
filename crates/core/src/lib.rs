//! `storefront-core` — shared building blocks for the storefront crates.
//!
//! This crate contains **pure** primitives only (no IO, no HTTP, no storage).

pub mod error;
pub mod id;
pub mod money;
pub mod reducer;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use money::format_price;
pub use reducer::Reducer;
