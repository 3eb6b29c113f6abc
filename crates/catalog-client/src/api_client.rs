//! HTTP client for the product catalog API

use crate::error::{ClientError, ClientResult, PRODUCTS_FAILED};
use crate::query::ProductQuery;
use async_trait::async_trait;
use catalog_core::ProductsPage;
use reqwest::Client;
use tracing::{debug, warn};

/// Anything that can serve a page of products for a query
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of products
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be retrieved or decoded.
    async fn fetch_products(&self, query: &ProductQuery) -> ClientResult<ProductsPage>;
}

/// API client for the product catalog
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_products(&self, query: &ProductQuery) -> ClientResult<ProductsPage> {
        let url = query.url(&self.base_url);
        debug!(%url, "Fetching products");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                context: PRODUCTS_FAILED,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), %url, "Catalog API returned error");
            return Err(ClientError::Status {
                context: PRODUCTS_FAILED,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ClientError::Http {
            context: PRODUCTS_FAILED,
            source,
        })?;

        let page: ProductsPage =
            serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
                context: PRODUCTS_FAILED,
                source,
            })?;

        debug!(
            total = page.total,
            skip = page.skip,
            count = page.products.len(),
            "Products page received"
        );

        Ok(page)
    }
}
