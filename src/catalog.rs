//! Catalog items and the remote catalog source.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;

/// A sellable item as returned by the catalog endpoint.
///
/// Read-only for the checkout subsystem; stock is the figure at fetch
/// time and is never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogItem {
    /// Unique item identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Unit sale price, in minor currency units.
    pub unit_price: u64,

    /// Units currently in stock.
    pub stock: u32,
}

/// Read-only source of sellable items.
#[automock]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full list of sellable items.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`]: transport failure or undecodable body.
    /// - [`CatalogError::UnexpectedResponse`]: non-success status.
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError>;
}

/// HTTP client for the remote catalog endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    config: ApiConfig,
    http: Client,
}

impl HttpCatalogSource {
    /// Create a new source from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn list_items(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let url = format!("{}/api/items", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(CatalogError::UnexpectedResponse(format!(
                "catalog request failed with status {status}: {text}"
            )));
        }

        let items: Vec<CatalogItem> = response.json().await?;

        Ok(items)
    }
}

/// Errors raised while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog endpoint returned a non-success status.
    #[error("unexpected response from catalog endpoint: {0}")]
    UnexpectedResponse(String),
}
