//! Login and logout calls.
//!
//! Token management is out of scope; the server tracks the session, and
//! this module only issues the single login and logout requests.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Account username.
    pub username: String,

    /// Account password.
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginFailure {
    error: Option<String>,
}

/// HTTP client for the login and logout endpoints.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: ApiConfig,
    http: Client,
}

impl AuthClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Attempt to log in with the given credentials.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Http`]: the server could not be reached.
    /// - [`AuthError::Rejected`]: the server refused the credentials.
    ///   The message is taken from the response body when present.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let url = format!("{}/api/login", self.config.base_url);

        let response = self.http.post(&url).json(credentials).send().await?;

        if response.status().is_success() {
            return Ok(());
        }

        let failure: LoginFailure = response
            .json()
            .await
            .unwrap_or(LoginFailure { error: None });

        Err(AuthError::Rejected(failure.error.unwrap_or_else(|| {
            "invalid username or password".to_owned()
        })))
    }

    /// End the current session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Http`] on transport failure or a non-success
    /// status.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let url = format!("{}/api/logout", self.config.base_url);

        self.http.post(&url).send().await?.error_for_status()?;

        Ok(())
    }
}

/// Errors raised during login or logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An HTTP transport error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server refused the credentials.
    #[error("login rejected: {0}")]
    Rejected(String),
}
