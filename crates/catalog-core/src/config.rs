//! Configuration management for the catalog admin

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix, e.g. `CATALOG_ADMIN_API__BASE_URL`
pub const ENV_PREFIX: &str = "CATALOG_ADMIN";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Product list configuration
    #[serde(default)]
    pub products: ProductsConfig,

    /// Authentication and token storage configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog and auth endpoints
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Product list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductsConfig {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet interval before a typed search is committed, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// How long a fetched page is served from cache, in seconds
    #[serde(default = "default_stale_time_secs")]
    pub stale_time_secs: u64,

    /// Maximum number of numbered page buttons
    #[serde(default = "default_max_page_buttons")]
    pub max_page_buttons: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Key the token is stored under in both stores
    #[serde(default = "default_token_key")]
    pub token_key: String,

    /// Directory holding the persistent ("remember me") store
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_base_url() -> String {
    "https://dummyjson.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    5
}

const fn default_page_size() -> u32 {
    10
}

const fn default_search_debounce_ms() -> u64 {
    500
}

const fn default_stale_time_secs() -> u64 {
    30
}

const fn default_max_page_buttons() -> u32 {
    5
}

fn default_token_key() -> String {
    "token".to_string()
}

fn default_storage_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "catalog-admin").map_or_else(
        || PathBuf::from(".catalog-admin"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Total request timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connection timeout
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for ProductsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            stale_time_secs: default_stale_time_secs(),
            max_page_buttons: default_max_page_buttons(),
        }
    }
}

impl ProductsConfig {
    /// Search debounce interval
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Cache staleness interval
    #[must_use]
    pub const fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            storage_dir: default_storage_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from the default file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default one
    ///
    /// Sources in increasing priority: `catalog-admin.{toml,yaml,json}` in the
    /// working directory, `path` when given, then `CATALOG_ADMIN_*`
    /// environment variables with `__` separating nested keys.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, parsed or validated.
    pub fn load_from(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("catalog-admin").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that would make the product list unusable
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the offending key.
    pub fn validate(&self) -> crate::Result<()> {
        if self.products.page_size == 0 {
            return Err(crate::Error::configuration(
                "products.page_size must be greater than 0",
            ));
        }
        if self.products.max_page_buttons == 0 {
            return Err(crate::Error::configuration(
                "products.max_page_buttons must be greater than 0",
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(crate::Error::configuration("api.base_url must not be empty"));
        }
        if self.auth.token_key.trim().is_empty() {
            return Err(crate::Error::configuration("auth.token_key must not be empty"));
        }
        Ok(())
    }
}
