//! Application context shared by the CLI and the shell

use crate::auth::{FileStore, LoginFlow, MemoryStore, TokenStore};
use crate::products::ProductListController;
use catalog_client::{AuthClient, CatalogClient, ClientResult, build_http_client};
use catalog_core::Config;
use std::sync::Arc;
use tracing::debug;

/// Configuration and clients for one run of the admin client
#[derive(Debug, Clone)]
pub struct App {
    /// Loaded configuration
    pub config: Config,
    /// Product catalog client
    pub catalog: CatalogClient,
    /// Auth endpoint client
    pub auth: AuthClient,
    /// Token storage (file-backed persistent store, in-memory session store)
    pub tokens: TokenStore,
}

impl App {
    /// Build clients and token storage from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: Config) -> ClientResult<Self> {
        let http = build_http_client(&config.api)?;
        let catalog = CatalogClient::new(http.clone(), config.api.base_url.clone());
        let auth = AuthClient::new(http, config.api.base_url.clone());

        let persistent = FileStore::in_dir(&config.auth.storage_dir);
        debug!(path = %persistent.path().display(), "Persistent token storage");
        let tokens = TokenStore::new(
            config.auth.token_key.clone(),
            Arc::new(persistent),
            Arc::new(MemoryStore::new()),
        );

        Ok(Self {
            config,
            catalog,
            auth,
            tokens,
        })
    }

    /// Login flow writing to this app's token storage
    #[must_use]
    pub fn login_flow(&self) -> LoginFlow<AuthClient> {
        LoginFlow::new(self.auth.clone(), self.tokens.clone())
    }

    /// Fresh product list over the catalog client
    #[must_use]
    pub fn product_list(&self) -> ProductListController<CatalogClient> {
        ProductListController::new(self.catalog.clone(), &self.config.products)
    }
}
