//! Short-lived cache of fetched product pages

use catalog_client::ProductQuery;
use catalog_core::ProductsPage;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

/// Pages keyed by the request that produced them
///
/// An entry is fresh for `stale_time` after it was stored. Stale entries
/// are never served and are pruned on the next insert.
#[derive(Debug)]
pub struct QueryCache {
    stale_time: Duration,
    entries: HashMap<ProductQuery, (ProductsPage, Instant)>,
}

impl QueryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self {
            stale_time,
            entries: HashMap::new(),
        }
    }

    /// Fresh page for `query`, if any
    #[must_use]
    pub fn get_fresh(&self, query: &ProductQuery) -> Option<&ProductsPage> {
        self.entries
            .get(query)
            .filter(|(_, stored_at)| stored_at.elapsed() < self.stale_time)
            .map(|(page, _)| page)
    }

    /// Store a page, dropping anything that has gone stale
    pub fn insert(&mut self, query: ProductQuery, page: ProductsPage) {
        let stale_time = self.stale_time;
        self.entries
            .retain(|_, (_, stored_at)| stored_at.elapsed() < stale_time);
        self.entries.insert(query, (page, Instant::now()));
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
