//! Product list controller
//!
//! Owns the query parameters, the debounced search input, the last fetched
//! page and the locally created products, and turns them into requests and
//! a renderable [`ProductListView`].

use super::cache::QueryCache;
use super::debounce::Debouncer;
use super::form::{AddProductField, AddProductForm, LocalIdGenerator};
use super::query_state::QueryState;
use super::view::ProductListView;
use crate::forms::FieldErrors;
use catalog_client::{CatalogSource, ClientResult, ProductQuery};
use catalog_core::config::ProductsConfig;
use catalog_core::{Product, ProductsPage, SortField};
use tracing::{debug, info, warn};

/// What the list is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// No data yet, request in flight
    Loading,
    /// Last request failed with a user-visible message
    Error(String),
    /// Data shown, nothing in flight
    Loaded,
    /// Data shown, newer request in flight
    Refetching,
}

impl LoadState {
    /// Whether a request is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        matches!(self, Self::Loading | Self::Refetching)
    }

    /// Error message, if the last request failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// A request issued by [`ProductListController::begin_fetch`]
///
/// Completing an older ticket after a newer one was issued has no effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    query: ProductQuery,
}

impl FetchTicket {
    /// Sequence number, increasing per issued request
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Request descriptor to send
    #[must_use]
    pub const fn query(&self) -> &ProductQuery {
        &self.query
    }
}

/// Result of a fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Served from the cache without a request
    Cached,
    /// Response applied
    Applied,
    /// Response belonged to a superseded request and was dropped
    Discarded,
    /// Request failed; the message is in [`LoadState::Error`]
    Failed,
}

/// State of the add-product modal
#[derive(Debug, Clone, Default)]
pub struct AddFormState {
    /// Whether the modal is shown
    pub open: bool,
    /// Current input
    pub form: AddProductForm,
    /// Errors from the last submit
    pub errors: FieldErrors,
}

/// Drives the product list against a [`CatalogSource`]
#[derive(Debug)]
pub struct ProductListController<S> {
    source: S,
    query: QueryState,
    search_input: String,
    debouncer: Debouncer<String>,
    cache: QueryCache,
    result: Option<ProductsPage>,
    state: LoadState,
    latest_seq: u64,
    local: Vec<Product>,
    ids: LocalIdGenerator,
    add_form: AddFormState,
    max_page_buttons: u32,
}

impl<S: CatalogSource> ProductListController<S> {
    /// Create a controller with default query parameters
    pub fn new(source: S, config: &ProductsConfig) -> Self {
        Self {
            source,
            query: QueryState::new(config.page_size),
            search_input: String::new(),
            debouncer: Debouncer::new(config.search_debounce()),
            cache: QueryCache::new(config.stale_time()),
            result: None,
            state: LoadState::Loading,
            latest_seq: 0,
            local: Vec::new(),
            ids: LocalIdGenerator::default(),
            add_form: AddFormState::default(),
            max_page_buttons: config.max_page_buttons,
        }
    }

    /// Drop everything the list accumulated since it was shown
    ///
    /// Query parameters return to their defaults; cached pages and locally
    /// added products are discarded. Requests still in flight are superseded.
    pub fn reset(&mut self) {
        debug!(local = self.local.len(), cached = self.cache.len(), "Resetting product list");
        self.query = QueryState::new(self.query.page_size());
        self.search_input.clear();
        self.debouncer = Debouncer::new(self.debouncer.quiet());
        self.cache.clear();
        self.result = None;
        self.state = LoadState::Loading;
        self.latest_seq += 1;
        self.local.clear();
        self.add_form = AddFormState::default();
    }

    /// Committed query parameters
    #[must_use]
    pub const fn query(&self) -> &QueryState {
        &self.query
    }

    /// Search text as typed, possibly not yet committed
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Current load state
    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    /// Last successfully fetched page
    #[must_use]
    pub const fn result(&self) -> Option<&ProductsPage> {
        self.result.as_ref()
    }

    /// Products created locally, newest first
    #[must_use]
    pub fn local_products(&self) -> &[Product] {
        &self.local
    }

    /// Number of pages once a page has been loaded
    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.result
            .as_ref()
            .map(|page| u32::try_from(page.total_pages()).unwrap_or(u32::MAX))
    }

    /// Projection for rendering
    #[must_use]
    pub fn view(&self) -> ProductListView<'_> {
        ProductListView {
            query: &self.query,
            result: self.result.as_ref(),
            local: &self.local,
            state: &self.state,
            max_page_buttons: self.max_page_buttons,
        }
    }

    /// Record typed search text
    ///
    /// The page goes back to 1 immediately; the term itself is committed
    /// once the input has been quiet for the debounce interval.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.query.reset_page();
        self.search_input.clone_from(&term);
        self.debouncer.push(term);
    }

    /// Commit the typed search if its quiet interval has elapsed
    ///
    /// Returns whether the committed term changed.
    pub fn commit_due_search(&mut self) -> bool {
        self.debouncer
            .take_due()
            .is_some_and(|term| self.commit_search(term))
    }

    /// Wait out the quiet interval and commit the typed search
    ///
    /// Returns whether the committed term changed.
    pub async fn settle(&mut self) -> bool {
        match self.debouncer.settle().await {
            Some(term) => self.commit_search(term),
            None => false,
        }
    }

    /// Commit the typed search without waiting
    ///
    /// Returns whether the committed term changed.
    pub fn flush_search(&mut self) -> bool {
        self.debouncer
            .flush()
            .is_some_and(|term| self.commit_search(term))
    }

    fn commit_search(&mut self, term: String) -> bool {
        let changed = self.query.set_search(term);
        if changed {
            debug!(search = %self.query.search(), "Search committed");
        }
        changed
    }

    /// Sort by `field`, flipping the direction if it is already active
    pub fn toggle_sort(&mut self, field: SortField) {
        self.query.toggle_sort(field);
        debug!(sort = %field, order = %self.query.order(), "Sort changed");
    }

    /// Move to page `n`, clamped to the known page count
    pub fn set_page(&mut self, n: u32) -> u32 {
        let total_pages = self.total_pages();
        self.query.set_page(n, total_pages)
    }

    /// Move one page forward
    pub fn next_page(&mut self) -> u32 {
        self.set_page(self.query.page().saturating_add(1))
    }

    /// Move one page back
    pub fn prev_page(&mut self) -> u32 {
        self.set_page(self.query.page().saturating_sub(1))
    }

    /// Issue a request for the current query
    ///
    /// Marks the list as loading (or refetching when data is shown) and
    /// supersedes every earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.state = if self.result.is_some() {
            LoadState::Refetching
        } else {
            LoadState::Loading
        };

        let query = self.query.to_query();
        debug!(
            seq = self.latest_seq,
            page = self.query.page(),
            skip = query.skip,
            limit = query.limit,
            search = query.search.as_deref().unwrap_or_default(),
            "Fetch started"
        );

        FetchTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Apply the response for `ticket`
    ///
    /// Responses for superseded tickets are dropped, so a slow request can
    /// never overwrite a newer one.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        response: ClientResult<ProductsPage>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding superseded response"
            );
            return FetchOutcome::Discarded;
        }

        match response {
            Ok(page) => {
                info!(
                    seq = ticket.seq,
                    total = page.total,
                    skip = page.skip,
                    rows = page.products.len(),
                    "Products loaded"
                );
                self.cache.insert(ticket.query, page.clone());
                self.result = Some(page);
                self.state = LoadState::Loaded;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "Failed to load products");
                self.state = LoadState::Error(e.user_message().to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Load the current page, from cache when it is still fresh
    pub async fn fetch_page(&mut self) -> FetchOutcome {
        let query = self.query.to_query();
        if let Some(page) = self.cache.get_fresh(&query) {
            debug!(skip = query.skip, "Serving products from cache");
            // Outstanding tickets are older than this result
            self.latest_seq += 1;
            self.result = Some(page.clone());
            self.state = LoadState::Loaded;
            return FetchOutcome::Cached;
        }
        self.refetch().await
    }

    /// Load the current page from the server, ignoring the cache
    pub async fn refetch(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let response = self.source.fetch_products(ticket.query()).await;
        self.complete_fetch(ticket, response)
    }

    /// Validate `form` and prepend the resulting product to the local list
    ///
    /// Local products are shown on page 1 only and never sent to the server.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when the form is invalid.
    pub fn add_local_product(&mut self, form: &AddProductForm) -> Result<&Product, FieldErrors> {
        let product = form.into_product(self.ids.next_id())?;
        info!(id = product.id, title = %product.title, "Local product added");
        self.local.insert(0, product);
        self.local.first().ok_or_else(FieldErrors::new)
    }

    /// Add-product modal state
    #[must_use]
    pub const fn add_form(&self) -> &AddFormState {
        &self.add_form
    }

    /// Show the add-product modal
    pub fn open_add_form(&mut self) {
        self.add_form.open = true;
    }

    /// Hide the add-product modal, keeping its input
    pub fn close_add_form(&mut self) {
        self.add_form.open = false;
    }

    /// Change one input of the add-product modal
    pub fn update_add_form(&mut self, field: AddProductField, value: impl Into<String>) {
        self.add_form.form.set(field, value);
    }

    /// Submit the add-product modal
    ///
    /// On success the modal closes and its input and errors are cleared; on
    /// failure it stays open with the field errors.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when the input is invalid.
    pub fn submit_add_form(&mut self) -> Result<Product, FieldErrors> {
        let form = self.add_form.form.clone();
        match self.add_local_product(&form) {
            Ok(product) => {
                let product = product.clone();
                self.add_form = AddFormState::default();
                Ok(product)
            }
            Err(errors) => {
                self.add_form.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
