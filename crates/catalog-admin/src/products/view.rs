//! Read-only projection of the product list for rendering

use super::controller::LoadState;
use super::query_state::QueryState;
use catalog_core::{Product, ProductsPage};

/// Everything a table and paginator need to draw the current list
#[derive(Debug, Clone, Copy)]
pub struct ProductListView<'a> {
    pub(crate) query: &'a QueryState,
    pub(crate) result: Option<&'a ProductsPage>,
    pub(crate) local: &'a [Product],
    pub(crate) state: &'a LoadState,
    pub(crate) max_page_buttons: u32,
}

impl<'a> ProductListView<'a> {
    /// Current query parameters
    #[must_use]
    pub const fn query(&self) -> &'a QueryState {
        self.query
    }

    /// Current load state
    #[must_use]
    pub const fn state(&self) -> &'a LoadState {
        self.state
    }

    /// Whether a request is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.state.is_fetching()
    }

    /// Rows to show: local products first on page 1, then the server page
    #[must_use]
    pub fn visible_products(&self) -> Vec<&'a Product> {
        let server = self.result.map(|page| page.products.as_slice()).unwrap_or_default();
        let local = if self.query.page() == 1 { self.local } else { &[] };
        local.iter().chain(server).collect()
    }

    /// Total matching products reported by the server
    #[must_use]
    pub fn total(&self) -> u64 {
        self.result.map_or(0, |page| page.total)
    }

    /// Number of pages, 0 before the first load
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.result
            .map_or(0, |page| u32::try_from(page.total_pages()).unwrap_or(u32::MAX))
    }

    /// Numbered page buttons: `1..=min(total_pages, max_page_buttons)`, at least one
    #[must_use]
    pub fn page_buttons(&self) -> Vec<u32> {
        let max = self.total_pages().max(1).min(self.max_page_buttons);
        (1..=max).collect()
    }

    /// 1-based range of server rows on this page, `(0, 0)` before data
    #[must_use]
    pub fn shown_range(&self) -> (u64, u64) {
        self.result.map_or((0, 0), |page| {
            let to = (page.skip + page.limit).min(page.total);
            (page.skip + 1, to)
        })
    }

    /// Whether a previous page exists
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.query.page() > 1
    }

    /// Whether a next page exists
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.query.page() < self.total_pages()
    }
}
