//! HTTP clients for the product catalog and auth endpoints
//!
//! [`CatalogClient`] reads pages of products and [`AuthClient`] exchanges
//! credentials for a bearer token. Both sit behind small traits
//! ([`CatalogSource`], [`AuthService`]) so the admin controllers can be
//! driven by test doubles.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod auth;
pub mod error;
pub mod query;

pub use api_client::{CatalogClient, CatalogSource};
pub use auth::{AuthClient, AuthService, Credentials, LoginResponse};
pub use error::{ClientError, ClientResult};
pub use query::ProductQuery;

/// Build the shared reqwest client from API configuration
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(api: &catalog_core::config::ApiConfig) -> ClientResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(api.timeout())
        .connect_timeout(api.connect_timeout())
        .user_agent(concat!("catalog-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|source| ClientError::Http {
            context: "Failed to build HTTP client",
            source,
        })
}
