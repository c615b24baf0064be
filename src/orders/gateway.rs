//! Order submission gateway.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use tracing::{error, info};

use crate::config::ApiConfig;

use super::{
    errors::OrderError,
    models::{OrderReceipt, OrderRequest},
};

/// One-shot network transaction recording a completed sale.
#[automock]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submit the order to the create-order endpoint.
    ///
    /// # Errors
    ///
    /// - [`OrderError::Connection`]: the server could not be reached.
    /// - [`OrderError::Rejected`]: the server answered with a non-success
    ///   status.
    /// - [`OrderError::MalformedResponse`]: the server answered with a
    ///   success status but the body was not a receipt.
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, OrderError>;
}

/// HTTP client for the create-order endpoint.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    config: ApiConfig,
    http: Client,
}

impl HttpOrderGateway {
    /// Create a new gateway from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, OrderError> {
        let url = format!("{}/api/orders", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .json(order)
            .send()
            .await
            .map_err(OrderError::Connection)?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("order submission rejected with status {status}: {body}");

            return Err(OrderError::Rejected { status });
        }

        let body = response.text().await.map_err(OrderError::Connection)?;
        let receipt: OrderReceipt = serde_json::from_str(&body)?;

        info!(invoice = %receipt.invoice, "order recorded");

        Ok(receipt)
    }
}
