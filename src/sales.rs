//! Sales history client.

use jiff::Timestamp;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;

/// One line of a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleLine {
    /// Item display name at sale time.
    pub name: String,

    /// Units sold.
    pub qty: u32,

    /// Unit sale price at sale time, in minor currency units.
    pub unit_price: u64,
}

/// A recorded sale, as returned by the sales history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleRecord {
    /// Unique sale identifier.
    pub id: u32,

    /// When the sale was recorded.
    pub created_at: Timestamp,

    /// Sale total, in minor currency units. Negative totals represent
    /// corrections.
    pub total: i64,

    /// The lines sold.
    #[serde(default)]
    pub lines: Vec<SaleLine>,
}

/// HTTP client for the sales history endpoint.
#[derive(Debug, Clone)]
pub struct SalesClient {
    config: ApiConfig,
    http: Client,
}

impl SalesClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch the recorded sales, newest first as the server returns
    /// them.
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::Http`] on transport failure or an
    /// undecodable body, [`SalesError::UnexpectedResponse`] on a
    /// non-success status.
    pub async fn recent_sales(&self) -> Result<Vec<SaleRecord>, SalesError> {
        let url = format!("{}/api/sales", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(SalesError::UnexpectedResponse(format!(
                "sales request failed with status {status}: {text}"
            )));
        }

        let sales = response.json().await?;

        Ok(sales)
    }
}

/// Errors raised while fetching the sales history.
#[derive(Debug, Error)]
pub enum SalesError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sales endpoint returned a non-success status.
    #[error("unexpected response from sales endpoint: {0}")]
    UnexpectedResponse(String),
}
