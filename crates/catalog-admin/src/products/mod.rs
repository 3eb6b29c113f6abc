//! Product list: query parameters, fetching, caching and local additions

pub mod cache;
pub mod controller;
pub mod debounce;
pub mod form;
pub mod query_state;
pub mod view;

pub use controller::{AddFormState, FetchOutcome, FetchTicket, LoadState, ProductListController};
pub use form::{AddProductField, AddProductForm, LOCAL_CATEGORY};
pub use query_state::QueryState;
pub use view::ProductListView;
