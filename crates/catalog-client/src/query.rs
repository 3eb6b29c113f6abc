//! Request descriptor for a page of products

use catalog_core::{SortField, SortOrder};
use serde::{Deserialize, Serialize};

/// Everything needed to request one page of products
///
/// Doubles as the cache key: two equal descriptors always produce the same
/// URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Page size
    pub limit: u32,
    /// Offset of the first row
    pub skip: u64,
    /// Search term, never empty when present
    pub search: Option<String>,
    /// Sort column and direction
    pub sort: Option<(SortField, SortOrder)>,
}

impl ProductQuery {
    /// Query for `limit` rows starting at `skip`
    #[must_use]
    pub const fn new(limit: u32, skip: u64) -> Self {
        Self {
            limit,
            skip,
            search: None,
            sort: None,
        }
    }

    /// Set the search term; an empty term clears it
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    /// Set the sort column and direction
    #[must_use]
    pub const fn with_sort(mut self, field: SortField, order: SortOrder) -> Self {
        self.sort = Some((field, order));
        self
    }

    /// Endpoint path; searches go to the dedicated search endpoint
    #[must_use]
    pub const fn path(&self) -> &'static str {
        if self.search.is_some() {
            "/products/search"
        } else {
            "/products"
        }
    }

    /// Encoded query string in `limit, skip, q, sortBy, order` order
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut params = vec![
            format!("limit={}", self.limit),
            format!("skip={}", self.skip),
        ];

        if let Some(ref search) = self.search {
            params.push(format!("q={}", urlencoding::encode(search)));
        }
        if let Some((field, order)) = self.sort {
            params.push(format!("sortBy={field}"));
            params.push(format!("order={order}"));
        }

        params.join("&")
    }

    /// Full request URL against `base_url`
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        format!(
            "{}{}?{}",
            base_url.trim_end_matches('/'),
            self.path(),
            self.query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_page_without_filters() {
        let query = ProductQuery::new(10, 0);

        assert_eq!(query.path(), "/products");
        assert_eq!(query.query_string(), "limit=10&skip=0");
    }

    #[test]
    fn test_third_page_offset() {
        let query = ProductQuery::new(10, 20);

        assert_eq!(
            query.url("https://dummyjson.com"),
            "https://dummyjson.com/products?limit=10&skip=20"
        );
    }

    #[test]
    fn test_search_switches_endpoint_and_adds_q() {
        let query = ProductQuery::new(10, 0)
            .with_search("phone")
            .with_sort(SortField::Price, SortOrder::Desc);

        assert_eq!(
            query.url("https://dummyjson.com/"),
            "https://dummyjson.com/products/search?limit=10&skip=0&q=phone&sortBy=price&order=desc"
        );
    }

    #[test]
    fn test_search_term_is_encoded() {
        let query = ProductQuery::new(5, 0).with_search("red & blue");

        assert_eq!(query.query_string(), "limit=5&skip=0&q=red%20%26%20blue");
    }

    #[test]
    fn test_empty_search_is_dropped() {
        let query = ProductQuery::new(10, 0).with_search("");

        assert!(query.search.is_none());
        assert_eq!(query.path(), "/products");
    }

    #[test]
    fn test_sort_without_search() {
        let query = ProductQuery::new(10, 10).with_sort(SortField::Title, SortOrder::Asc);

        assert_eq!(query.query_string(), "limit=10&skip=10&sortBy=title&order=asc");
    }
}
