//! Command execution against a mounted cart.

use std::sync::Arc;

use anyhow::Context;
use storefront_cart::{CartPersistence, CartProvider, place_order};
use storefront_products::{CatalogLoader, CatalogState, Product, ProductSource, find_product};

use crate::cli::Command;
use crate::views;

/// Application state for one run: the cart scope and the catalog source.
pub struct App {
    provider: CartProvider,
    source: Arc<dyn ProductSource>,
}

impl App {
    /// Mount the cart from `persistence` and wire the catalog source.
    pub fn new(source: Arc<dyn ProductSource>, persistence: CartPersistence) -> Self {
        let mut provider = CartProvider::new();
        provider.mount(persistence);
        Self { provider, source }
    }

    pub fn provider(&self) -> &CartProvider {
        &self.provider
    }

    /// Tear the cart scope down.
    pub fn shutdown(&mut self) {
        if self.provider.teardown().is_some() {
            tracing::debug!("cart scope torn down");
        }
    }

    /// Fetch the catalog once; failures become user-visible errors.
    async fn fetch_catalog(&self) -> anyhow::Result<Vec<Product>> {
        let mut loader = CatalogLoader::new(self.source.clone());
        loader.load().await;
        let products = match loader.state() {
            CatalogState::Ready(products) => Ok(products.clone()),
            CatalogState::Failed(msg) => Err(anyhow::anyhow!("{msg}")),
            CatalogState::Loading => Err(anyhow::anyhow!("catalog request was cancelled")),
        };
        loader.cancel();
        products
    }

    /// Run one command and return what should be printed.
    pub async fn execute(&mut self, command: Command) -> anyhow::Result<String> {
        tracing::debug!(?command, "executing command");

        let body = match command {
            Command::Products => {
                let products = self.fetch_catalog().await?;
                let cart = self.provider.use_cart()?;
                views::product_list(&products, cart.state())
            }
            Command::Add { id, qty } => {
                let products = self.fetch_catalog().await?;
                let product = find_product(&products, id)
                    .context("cannot add to cart")?
                    .clone();
                let title = product.title.clone();

                let cart = self.provider.use_cart_mut()?;
                cart.add(product, qty);
                match cart.line(id) {
                    Some(line) => format!("{title}: {} in cart", line.qty),
                    None => format!("{title}: not in cart"),
                }
            }
            Command::Remove { id } => {
                let cart = self.provider.use_cart_mut()?;
                if cart.contains(id) {
                    cart.remove(id);
                    format!("Removed product {id}")
                } else {
                    format!("Product {id} is not in the cart")
                }
            }
            Command::Set { id, qty } => {
                let cart = self.provider.use_cart_mut()?;
                if !cart.contains(id) {
                    format!("Product {id} is not in the cart")
                } else {
                    cart.set_qty(id, qty);
                    match cart.line(id) {
                        Some(line) => format!("Product {id}: {} in cart", line.qty),
                        None => format!("Removed product {id}"),
                    }
                }
            }
            Command::Clear => {
                self.provider.use_cart_mut()?.clear();
                "Cart cleared".to_string()
            }
            Command::Cart => views::cart_view(self.provider.use_cart()?.state()),
            Command::Checkout => {
                let cart = self.provider.use_cart_mut()?;
                let summary = views::checkout_summary(cart.state());
                match place_order(cart) {
                    Some(receipt) => format!("{summary}\n\n{}", views::receipt(&receipt)),
                    None => views::EMPTY_CART.to_string(),
                }
            }
        };

        let header = views::header(self.provider.use_cart()?.state());
        Ok(format!("{header}\n\n{body}"))
    }
}
