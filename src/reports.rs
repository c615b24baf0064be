//! Financial report client and filters.

use jiff::Timestamp;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ApiConfig;

/// One row of the sales report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportEntry {
    /// Unique sale identifier.
    pub id: u32,

    /// Invoice identifier for the sale.
    pub invoice: String,

    /// Sale total, in minor currency units. Sign determines which
    /// report slice the entry falls into.
    pub total: i64,

    /// Amount tendered.
    pub tendered: i64,

    /// Change returned.
    pub change: i64,

    /// Profit on the sale.
    pub profit: i64,

    /// When the sale was recorded.
    pub created_at: Timestamp,
}

/// Which slice of the sales report to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Entries with a non-negative total.
    Income,

    /// Entries with a negative total.
    Expense,

    /// Every entry.
    ProfitLoss,
}

/// Filter report entries for the given kind.
///
/// The income/expense split by the total's sign mirrors the upstream
/// data as-is; the sign convention is not interpreted further.
#[must_use]
pub fn filter_entries(entries: Vec<ReportEntry>, kind: ReportKind) -> Vec<ReportEntry> {
    entries
        .into_iter()
        .filter(|entry| match kind {
            ReportKind::Income => entry.total >= 0,
            ReportKind::Expense => entry.total < 0,
            ReportKind::ProfitLoss => true,
        })
        .collect()
}

/// HTTP client for the sales report endpoint.
#[derive(Debug, Clone)]
pub struct ReportsClient {
    config: ApiConfig,
    http: Client,
}

impl ReportsClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Fetch every sales report entry.
    ///
    /// # Errors
    ///
    /// Returns [`ReportsError::Http`] on transport failure or an
    /// undecodable body, [`ReportsError::UnexpectedResponse`] on a
    /// non-success status.
    pub async fn sales_report(&self) -> Result<Vec<ReportEntry>, ReportsError> {
        let url = format!("{}/api/reports/sales", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ReportsError::UnexpectedResponse(format!(
                "report request failed with status {status}: {text}"
            )));
        }

        let entries = response.json().await?;

        Ok(entries)
    }
}

/// Errors raised while fetching reports.
#[derive(Debug, Error)]
pub enum ReportsError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The report endpoint returned a non-success status.
    #[error("unexpected response from report endpoint: {0}")]
    UnexpectedResponse(String),
}
