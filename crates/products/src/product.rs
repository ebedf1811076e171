use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId};

/// Customer rating summary as reported by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u64,
}

/// A catalog product (matches the remote JSON shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in currency units, full precision.
    pub price: f64,
    pub description: String,
    pub category: String,
    /// Image URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    pub fn id(&self) -> ProductId {
        self.id
    }
}

/// Look up a product by id in a fetched catalog.
pub fn find_product(products: &[Product], id: ProductId) -> DomainResult<&Product> {
    products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| DomainError::not_found(id.to_string()))
}
