//! Error types for the catalog and auth clients

use thiserror::Error;

/// Message shown when a product page cannot be loaded
pub const PRODUCTS_FAILED: &str = "Failed to load products";

/// Message shown when a login attempt fails
pub const LOGIN_FAILED: &str = "Login failed";

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the remote API
///
/// Every variant carries the user-facing context of the operation that
/// failed; callers show [`ClientError::user_message`] and nothing finer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS)
    #[error("{context}: {source}")]
    Http {
        /// Operation context
        context: &'static str,
        /// Underlying reqwest error
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("{context} (HTTP {status})")]
    Status {
        /// Operation context
        context: &'static str,
        /// HTTP status code
        status: u16,
    },

    /// Response body did not match the expected shape
    #[error("{context}: invalid response body: {source}")]
    Decode {
        /// Operation context
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The single user-visible message for this failure
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match *self {
            Self::Http { context, .. }
            | Self::Status { context, .. }
            | Self::Decode { context, .. } => context,
        }
    }

    /// HTTP status, if the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
