//! Login form and submission

use super::token_store::{StorageError, TokenStore};
use crate::forms::FieldErrors;
use catalog_client::{AuthService, Credentials};
use catalog_core::AuthToken;
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

/// Input of the login screen
#[derive(Clone, Default, PartialEq, Eq, Validate)]
pub struct LoginForm {
    /// Account name
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    /// Keep the token across restarts
    pub remember: bool,
}

impl LoginForm {
    /// Create a form from raw values
    pub fn new(username: impl Into<String>, password: impl Into<String>, remember: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember,
        }
    }

    /// Per-field problems, empty when the form can be submitted
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        self.validate()
            .map_or_else(|e| FieldErrors::from(&e), |()| FieldErrors::new())
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("remember", &self.remember)
            .finish()
    }
}

/// Reasons a login attempt did not produce a stored token
#[derive(Debug, Error)]
pub enum LoginError {
    /// The form was not submitted
    #[error("Invalid login form: {0}")]
    Invalid(FieldErrors),

    /// The auth endpoint failed or rejected the credentials
    #[error("{0}")]
    Failed(&'static str),

    /// The token could not be stored
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Submits login forms and stores the resulting token
#[derive(Debug, Clone)]
pub struct LoginFlow<A> {
    auth: A,
    store: TokenStore,
}

impl<A: AuthService> LoginFlow<A> {
    /// Login flow over an auth service and token store
    pub const fn new(auth: A, store: TokenStore) -> Self {
        Self { auth, store }
    }

    /// Token store written on success
    #[must_use]
    pub const fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Validate, log in and persist the token
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Invalid`] without contacting the server when
    /// the form is incomplete, [`LoginError::Failed`] with a single
    /// user-visible message when the request fails.
    pub async fn submit(&self, form: &LoginForm) -> Result<AuthToken, LoginError> {
        let errors = form.field_errors();
        if !errors.is_empty() {
            return Err(LoginError::Invalid(errors));
        }

        let credentials = Credentials::new(form.username.clone(), form.password.clone());
        let response = self.auth.login(&credentials).await.map_err(|e| {
            warn!(username = %form.username, error = %e, "Login failed");
            LoginError::Failed(e.user_message())
        })?;

        self.store.set(&response.access_token, form.remember)?;
        info!(username = %form.username, remember = form.remember, "Logged in");
        Ok(response.access_token)
    }

    /// Forget the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if either store cannot be written.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_client::{ClientError, ClientResult, LoginResponse};
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[derive(Debug, Clone, Default)]
    struct FakeAuth {
        reject: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl AuthService for FakeAuth {
        async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
            self.calls.lock().push(credentials.username.clone());
            if self.reject {
                return Err(ClientError::Status {
                    context: catalog_client::error::LOGIN_FAILED,
                    status: 400,
                });
            }
            Ok(LoginResponse {
                access_token: AuthToken::new(format!("token-for-{}", credentials.username)),
                refresh_token: None,
                username: Some(credentials.username.clone()),
            })
        }
    }

    #[test]
    fn test_required_fields() {
        let errors = LoginForm::default().field_errors();

        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", LoginForm::new("emilys", "emilyspass", false));

        assert!(!rendered.contains("emilyspass"));
        assert!(rendered.contains("emilys"));
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let auth = FakeAuth::default();
        let flow = LoginFlow::new(auth.clone(), TokenStore::in_memory("token"));

        let err = flow.submit(&LoginForm::new("emilys", "", true)).await.unwrap_err();

        assert!(matches!(err, LoginError::Invalid(ref e) if e.len() == 1));
        assert!(auth.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_successful_login_stores_token() {
        let flow = LoginFlow::new(FakeAuth::default(), TokenStore::in_memory("token"));

        let token = flow
            .submit(&LoginForm::new("emilys", "emilyspass", true))
            .await
            .unwrap();

        assert_eq!(token.as_str(), "token-for-emilys");
        assert_eq!(flow.store().get().unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_rejected_login_has_single_message() {
        let auth = FakeAuth {
            reject: true,
            ..FakeAuth::default()
        };
        let flow = LoginFlow::new(auth, TokenStore::in_memory("token"));

        let err = flow
            .submit(&LoginForm::new("emilys", "wrong", false))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Login failed");
        assert!(!flow.store().has_token().unwrap());
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let flow = LoginFlow::new(FakeAuth::default(), TokenStore::in_memory("token"));
        flow.submit(&LoginForm::new("emilys", "emilyspass", false))
            .await
            .unwrap();

        flow.logout().unwrap();

        assert!(!flow.store().has_token().unwrap());
    }
}
