//! Catalog admin client
//!
//! Terminal admin panel for a product catalog: log in, browse a paginated,
//! searchable and sortable product table, and add products locally.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod app;
pub mod auth;
pub mod forms;
pub mod products;
pub mod render;
pub mod shell;

pub use app::App;
pub use forms::FieldErrors;
pub use shell::Shell;
