//! Routes and the authentication guard

use super::token_store::{StorageError, TokenStore};
use catalog_core::AuthToken;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Screens of the admin panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login form
    Login,
    /// Product table, requires a token
    Products,
}

impl Route {
    /// Canonical path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Products => "/products",
        }
    }

    /// Whether the route requires a stored token
    #[must_use]
    pub const fn is_guarded(self) -> bool {
        matches!(self, Self::Products)
    }

    /// Map a path to what should be shown
    ///
    /// `/` and unknown paths redirect to the login screen. Trailing slashes
    /// are ignored.
    #[must_use]
    pub fn resolve(path: &str) -> Navigation {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match normalized {
            "/login" => Navigation::Render(Self::Login),
            "/products" => Navigation::Render(Self::Products),
            _ => Navigation::Redirect(Self::Login),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of navigating to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Show this route
    Render(Route),
    /// Go to this route instead
    Redirect(Route),
}

impl Navigation {
    /// Route that ends up on screen
    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Reasons a guarded route cannot be shown
#[derive(Debug, Error)]
pub enum GuardError {
    /// No token is stored; the user must log in
    #[error("Not logged in")]
    NotAuthenticated,

    /// Token storage could not be read
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Gatekeeper for guarded routes
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Stored token for a guarded route
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::NotAuthenticated`] when no token is stored.
    pub fn require(store: &TokenStore) -> Result<AuthToken, GuardError> {
        store.get()?.ok_or(GuardError::NotAuthenticated)
    }

    /// Resolve `path` and apply the guard
    ///
    /// # Errors
    ///
    /// Returns an error if token storage cannot be read.
    pub fn navigate(path: &str, store: &TokenStore) -> Result<Navigation, StorageError> {
        let mut navigation = Route::resolve(path);
        if let Navigation::Render(route) = navigation {
            if route.is_guarded() && !store.has_token()? {
                navigation = Navigation::Redirect(Route::Login);
            }
        }
        debug!(path, target = %navigation.route(), "Navigated");
        Ok(navigation)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/", Navigation::Redirect(Route::Login))]
    #[case("", Navigation::Redirect(Route::Login))]
    #[case("/login", Navigation::Render(Route::Login))]
    #[case("/products", Navigation::Render(Route::Products))]
    #[case("/products/", Navigation::Render(Route::Products))]
    #[case("/orders", Navigation::Redirect(Route::Login))]
    fn test_resolve(#[case] path: &str, #[case] expected: Navigation) {
        assert_eq!(Route::resolve(path), expected);
    }

    #[test]
    fn test_guard_redirects_without_token() {
        let store = TokenStore::in_memory("token");

        assert!(matches!(
            RouteGuard::require(&store),
            Err(GuardError::NotAuthenticated)
        ));
        assert_eq!(
            RouteGuard::navigate("/products", &store).unwrap(),
            Navigation::Redirect(Route::Login)
        );
    }

    #[test]
    fn test_guard_passes_with_token() {
        let store = TokenStore::in_memory("token");
        store.set(&AuthToken::new("t"), false).unwrap();

        assert_eq!(RouteGuard::require(&store).unwrap().as_str(), "t");
        assert_eq!(
            RouteGuard::navigate("/products", &store).unwrap(),
            Navigation::Render(Route::Products)
        );
    }

    #[test]
    fn test_login_route_is_open() {
        let store = TokenStore::in_memory("token");

        assert_eq!(
            RouteGuard::navigate("/login", &store).unwrap(),
            Navigation::Render(Route::Login)
        );
    }
}
