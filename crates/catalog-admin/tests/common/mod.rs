//! Shared helpers for catalog-admin integration tests

#![allow(dead_code, clippy::unwrap_used)]

use catalog_admin::App;
use catalog_core::Config;
use serde_json::{Value, json};
use std::sync::Once;
use tempfile::TempDir;
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Configuration pointing at `server` with storage under `dir` and no search delay
pub fn test_config(server: &MockServer, dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_secs = 5;
    config.auth.storage_dir = dir.path().to_path_buf();
    config.products.search_debounce_ms = 0;
    config
}

/// App wired to `server`
pub fn test_app(server: &MockServer, dir: &TempDir) -> App {
    init_test_logging();
    App::new(test_config(server, dir)).unwrap()
}

/// A products response body with `count` rows starting after `skip`
pub fn products_body(skip: u64, count: u64, total: u64) -> Value {
    let products: Vec<Value> = (skip..skip + count)
        .map(|i| {
            json!({
                "id": i + 1,
                "title": format!("Product {}", i + 1),
                "category": "beauty",
                "price": 9.99,
                "rating": if i % 2 == 0 { 4.5 } else { 2.5 },
                "brand": "Essence",
                "sku": format!("SKU-{}", i + 1)
            })
        })
        .collect();
    json!({
        "products": products,
        "total": total,
        "skip": skip,
        "limit": 10
    })
}

/// A successful login response body
pub fn login_body(token: &str) -> Value {
    json!({
        "id": 1,
        "username": "emilys",
        "accessToken": token,
        "refreshToken": "refresh"
    })
}
