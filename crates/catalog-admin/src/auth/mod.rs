//! Login, token storage and the route guard

pub mod guard;
pub mod login;
pub mod token_store;

pub use guard::{GuardError, Navigation, Route, RouteGuard};
pub use login::{LoginError, LoginFlow, LoginForm};
pub use token_store::{FileStore, KeyValueStore, MemoryStore, StorageError, TokenStore};
