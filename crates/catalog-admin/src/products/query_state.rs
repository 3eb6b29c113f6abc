//! Paging, sorting and search parameters of the product list

use catalog_client::ProductQuery;
use catalog_core::{SortField, SortOrder};

/// Query parameters driven by user interaction
///
/// Any change to the search term or the sort column sends the list back to
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    search: String,
    sort: Option<SortField>,
    order: SortOrder,
}

impl QueryState {
    /// Defaults at mount: page 1, no search, no sort
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
            sort: None,
            order: SortOrder::Asc,
        }
    }

    /// Current page (1-based)
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Committed search term
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Active sort column
    #[must_use]
    pub const fn sort(&self) -> Option<SortField> {
        self.sort
    }

    /// Sort direction
    #[must_use]
    pub const fn order(&self) -> SortOrder {
        self.order
    }

    /// Offset of the first row on the current page
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }

    /// Go back to the first page
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Commit a search term; returns whether it changed
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        self.reset_page();
        if term == self.search {
            return false;
        }
        self.search = term;
        true
    }

    /// Flip the direction on the active column, or activate `field` ascending
    pub fn toggle_sort(&mut self, field: SortField) {
        self.reset_page();
        match self.sort {
            Some(current) if current == field => {
                self.order = self.order.toggled();
            }
            _ => {
                self.sort = Some(field);
                self.order = SortOrder::Asc;
            }
        }
    }

    /// Move to page `n`, clamped to `[1, total_pages]` when that is known
    ///
    /// A total of zero counts as unknown, as it does before the first load.
    ///
    /// Returns the page actually selected.
    pub fn set_page(&mut self, n: u32, total_pages: Option<u32>) -> u32 {
        let upper = total_pages.filter(|&t| t > 0).unwrap_or(u32::MAX);
        self.page = n.clamp(1, upper);
        self.page
    }

    /// Request descriptor for the current state
    #[must_use]
    pub fn to_query(&self) -> ProductQuery {
        let query = ProductQuery::new(self.page_size, self.skip()).with_search(self.search.clone());
        match self.sort {
            Some(field) => query.with_sort(field, self.order),
            None => query,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let state = QueryState::new(10);

        assert_eq!(state.page(), 1);
        assert_eq!(state.skip(), 0);
        assert_eq!(state.search(), "");
        assert_eq!(state.sort(), None);
        assert_eq!(state.order(), SortOrder::Asc);
        assert_eq!(state.to_query().query_string(), "limit=10&skip=0");
    }

    #[test]
    fn test_page_three_skips_twenty() {
        let mut state = QueryState::new(10);
        state.set_page(3, None);

        assert_eq!(state.skip(), 20);
        assert_eq!(state.to_query().query_string(), "limit=10&skip=20");
    }

    #[test]
    fn test_search_resets_page() {
        let mut state = QueryState::new(10);
        state.set_page(4, Some(10));

        assert!(state.set_search("phone"));
        assert_eq!(state.page(), 1);
        assert_eq!(state.to_query().path(), "/products/search");
    }

    #[test]
    fn test_same_search_still_resets_page() {
        let mut state = QueryState::new(10);
        state.set_search("phone");
        state.set_page(2, None);

        assert!(!state.set_search("phone"));
        assert_eq!(state.page(), 1);
    }

    #[rstest]
    #[case::same_field_flips(Some(SortField::Price), SortField::Price, SortOrder::Desc)]
    #[case::other_field_activates_ascending(Some(SortField::Price), SortField::Title, SortOrder::Asc)]
    #[case::first_toggle_is_ascending(None, SortField::Rating, SortOrder::Asc)]
    fn test_toggle_sort(
        #[case] initial: Option<SortField>,
        #[case] clicked: SortField,
        #[case] expected_order: SortOrder,
    ) {
        let mut state = QueryState::new(10);
        if let Some(field) = initial {
            state.toggle_sort(field);
        }
        state.set_page(5, None);

        state.toggle_sort(clicked);

        assert_eq!(state.sort(), Some(clicked));
        assert_eq!(state.order(), expected_order);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_two_flips_return_to_ascending() {
        let mut state = QueryState::new(10);
        state.toggle_sort(SortField::Sku);
        state.toggle_sort(SortField::Sku);
        state.toggle_sort(SortField::Sku);

        assert_eq!(state.order(), SortOrder::Asc);
    }

    #[test]
    fn test_switching_field_after_descending_resets_order() {
        let mut state = QueryState::new(10);
        state.toggle_sort(SortField::Price);
        state.toggle_sort(SortField::Price);
        assert_eq!(state.order(), SortOrder::Desc);

        state.toggle_sort(SortField::Brand);
        assert_eq!(state.order(), SortOrder::Asc);
        assert_eq!(state.to_query().query_string(), "limit=10&skip=0&sortBy=brand&order=asc");
    }

    #[rstest]
    #[case(0, Some(20), 1)]
    #[case(7, Some(20), 7)]
    #[case(25, Some(20), 20)]
    #[case(25, None, 25)]
    #[case(0, None, 1)]
    #[case(3, Some(0), 3)]
    fn test_set_page_clamps(#[case] requested: u32, #[case] total: Option<u32>, #[case] expected: u32) {
        let mut state = QueryState::new(10);
        assert_eq!(state.set_page(requested, total), expected);
        assert_eq!(state.page(), expected);
    }
}
