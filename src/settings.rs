//! Settings display client.

use jiff::Timestamp;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;

/// One configuration row from the settings endpoint.
///
/// Read-only: the app only displays these.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Setting {
    /// Unique setting identifier.
    pub id: u32,

    /// Group the setting belongs to.
    pub group: String,

    /// Variable name within the group.
    pub variable: String,

    /// Current value, as a string.
    pub value: String,

    /// Human-readable description.
    pub description: String,

    /// When the setting was last changed.
    pub updated_at: Timestamp,
}

/// HTTP client for the settings endpoint.
#[derive(Debug, Clone)]
pub struct SettingsClient {
    config: ApiConfig,
    http: Client,
}

impl SettingsClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch every setting.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Http`] on transport failure or an
    /// undecodable body, [`SettingsError::UnexpectedResponse`] on a
    /// non-success status.
    pub async fn list(&self) -> Result<Vec<Setting>, SettingsError> {
        let url = format!("{}/api/settings", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(SettingsError::UnexpectedResponse(format!(
                "settings request failed with status {status}: {text}"
            )));
        }

        let settings = response.json().await?;

        Ok(settings)
    }
}

/// Errors raised while fetching settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The settings endpoint returned a non-success status.
    #[error("unexpected response from settings endpoint: {0}")]
    UnexpectedResponse(String),
}
