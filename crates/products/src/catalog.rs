//! Catalog loading for one consumer lifetime.
//!
//! A consumer issues a single fetch when it mounts. If it is torn down before
//! the response arrives, the late result is dropped instead of being applied.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::product::Product;
use crate::source::ProductSource;

/// What a catalog consumer renders.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    Ready(Vec<Product>),
    /// User-visible failure message.
    Failed(String),
}

impl CatalogState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogState::Loading)
    }

    pub fn products(&self) -> &[Product] {
        match self {
            CatalogState::Ready(products) => products.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Shared "consumer is gone" flag.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Loads the catalog once for a consumer. Dropping the loader cancels it.
pub struct CatalogLoader<S> {
    source: S,
    cancel: CancelHandle,
    state: CatalogState,
}

impl<S: ProductSource> CatalogLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cancel: CancelHandle::default(),
            state: CatalogState::Loading,
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Mark the consumer as torn down.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Run the fetch and apply its outcome.
    ///
    /// Returns `false` when the result arrived after cancellation and was
    /// discarded; state then stays as it was.
    pub async fn load(&mut self) -> bool {
        let outcome = self.source.list_products().await;

        if self.cancel.is_cancelled() {
            tracing::debug!("catalog consumer torn down; discarding fetch result");
            return false;
        }

        self.state = match outcome {
            Ok(products) => CatalogState::Ready(products),
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch products");
                CatalogState::Failed(format!("Failed to fetch products: {err}"))
            }
        };
        true
    }
}

impl<S> Drop for CatalogLoader<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
