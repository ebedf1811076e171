//! Product catalog: product model, remote product source, catalog loading.
//!
//! The catalog is owned by a remote service; this crate only reads it. Products
//! are immutable once fetched.

pub mod catalog;
pub mod product;
pub mod source;

pub use catalog::{CancelHandle, CatalogLoader, CatalogState};
pub use product::{Product, Rating, find_product};
pub use source::{DEFAULT_CATALOG_URL, FetchError, HttpProductSource, ProductSource};
