//! Remote product source.

use std::sync::Arc;

use async_trait::async_trait;

use crate::product::Product;

/// Base URL of the public demo catalog.
pub const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("catalog responded with status {0}")]
    Status(u16),
    #[error("could not decode catalog response: {0}")]
    Decode(String),
}

/// Anything that can produce the product list.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError>;
}

#[async_trait]
impl<S> ProductSource for Arc<S>
where
    S: ProductSource + ?Sized,
{
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        (**self).list_products().await
    }
}

/// Product source backed by the catalog's HTTP API (`GET {base}/products`).
///
/// One request per call; no retries and no cached fallback.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpProductSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for HttpProductSource {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn list_products(&self) -> Result<Vec<Product>, FetchError> {
        let url = format!("{}/products", self.base_url);
        tracing::debug!(%url, "fetching product catalog");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            tracing::warn!(%url, status, "catalog request failed");
            return Err(FetchError::Status(status));
        }

        let products: Vec<Product> = resp
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        tracing::info!(count = products.len(), "fetched product catalog");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::json;
    use storefront_core::ProductId;

    struct TestCatalog {
        base_url: String,
        handle: tokio::task::JoinHandle<()>,
    }

    impl TestCatalog {
        async fn spawn(app: Router) -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind ephemeral port");
            let addr = listener.local_addr().unwrap();
            let base_url = format!("http://{}", addr);

            let handle = tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self { base_url, handle }
        }
    }

    impl Drop for TestCatalog {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    #[tokio::test]
    async fn lists_products_from_catalog() {
        let app = Router::new().route(
            "/products",
            get(|| async {
                Json(json!([
                    {
                        "id": 1,
                        "title": "Backpack",
                        "price": 109.95,
                        "description": "bag",
                        "category": "men's clothing",
                        "image": "https://example.test/1.jpg",
                        "rating": { "rate": 3.9, "count": 120 }
                    },
                    {
                        "id": 2,
                        "title": "T-Shirt",
                        "price": 22.3,
                        "description": "shirt",
                        "category": "men's clothing",
                        "image": "https://example.test/2.jpg"
                    }
                ]))
            }),
        );
        let server = TestCatalog::spawn(app).await;

        let source = HttpProductSource::new(format!("{}/", server.base_url));
        let products = source.list_products().await.unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId(1));
        assert_eq!(products[1].title, "T-Shirt");
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let app = Router::new().route(
            "/products",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let server = TestCatalog::spawn(app).await;

        let err = HttpProductSource::new(server.base_url.clone())
            .list_products()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let app = Router::new().route("/products", get(|| async { "not json" }));
        let server = TestCatalog::spawn(app).await;

        let err = HttpProductSource::new(server.base_url.clone())
            .list_products()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_catalog_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpProductSource::new(format!("http://{}", addr))
            .list_products()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let source = HttpProductSource::new("https://catalog.test///");
        assert_eq!(source.base_url(), "https://catalog.test");
        assert_eq!(HttpProductSource::default().base_url(), DEFAULT_CATALOG_URL);
    }
}
