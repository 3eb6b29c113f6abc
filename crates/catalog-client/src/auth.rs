//! HTTP client for the authentication endpoint

use crate::error::{ClientError, ClientResult, LOGIN_FAILED};
use async_trait::async_trait;
use catalog_core::AuthToken;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Login credentials sent to the auth endpoint
#[derive(Clone, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login response
///
/// Only the access token is required; the remaining profile fields are kept
/// when the server sends them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token
    pub access_token: AuthToken,

    /// Refresh token, if issued
    #[serde(default)]
    pub refresh_token: Option<AuthToken>,

    /// Account name echoed by the server
    #[serde(default)]
    pub username: Option<String>,
}

/// Anything that can exchange credentials for a token
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Log in with the given credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the credentials are rejected.
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse>;
}

/// API client for the auth endpoint
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn login_url(&self) -> String {
        format!("{}/auth/login", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl AuthService for AuthClient {
    async fn login(&self, credentials: &Credentials) -> ClientResult<LoginResponse> {
        debug!(username = %credentials.username, "Submitting login");

        let response = self
            .client
            .post(self.login_url())
            .json(credentials)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                context: LOGIN_FAILED,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), username = %credentials.username, "Login rejected");
            return Err(ClientError::Status {
                context: LOGIN_FAILED,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ClientError::Http {
            context: LOGIN_FAILED,
            source,
        })?;

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            context: LOGIN_FAILED,
            source,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_response_decodes_access_token() {
        let body = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "accessToken": "access-123",
            "refreshToken": "refresh-456"
        }"#;

        let response: LoginResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.access_token.as_str(), "access-123");
        assert_eq!(
            response.refresh_token.as_ref().map(AuthToken::as_str),
            Some("refresh-456")
        );
        assert_eq!(response.username.as_deref(), Some("emilys"));
    }

    #[test]
    fn test_login_response_requires_access_token() {
        assert!(serde_json::from_str::<LoginResponse>(r#"{"username": "emilys"}"#).is_err());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("emilys", "emilyspass");
        let debug = format!("{credentials:?}");

        assert!(debug.contains("emilys"));
        assert!(!debug.contains("emilyspass"));
    }

    #[test]
    fn test_login_url_trims_trailing_slash() {
        let client = AuthClient::new(Client::new(), "https://dummyjson.com/");
        assert_eq!(client.login_url(), "https://dummyjson.com/auth/login");
    }
}
