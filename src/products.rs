//! Product management client.
//!
//! CRUD over the same item records the catalog reads, plus the category
//! and unit lookups used by the product form.

use rand::Rng as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;

/// A managed product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: u32,

    /// Display name.
    pub name: String,

    /// Product code, e.g. `"BRG-1042"`.
    pub code: String,

    /// Sale price, in minor currency units.
    pub sale_price: u64,

    /// Purchase price, in minor currency units.
    pub purchase_price: u64,

    /// Units currently in stock.
    pub stock: u32,

    /// Whether the product is sellable.
    pub active: bool,

    /// Category the product belongs to, if any.
    pub category_id: Option<u32>,

    /// Unit name, e.g. `"pcs"`.
    pub unit_name: String,

    /// Units per package.
    pub unit_value: u32,
}

/// Payload for creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDraft {
    /// Display name.
    pub name: String,

    /// Product code. Use [`ProductDraft::generated_code`] when the user
    /// leaves it blank.
    pub code: String,

    /// Sale price, in minor currency units.
    pub sale_price: u64,

    /// Purchase price, in minor currency units.
    pub purchase_price: u64,

    /// Initial stock.
    pub stock: u32,

    /// Whether the product is sellable.
    pub active: bool,

    /// Category the product belongs to, if any.
    pub category_id: Option<u32>,

    /// Unit name, e.g. `"pcs"`.
    pub unit_name: String,

    /// Units per package.
    pub unit_value: u32,
}

impl ProductDraft {
    /// Fallback product code: `BRG-` followed by four random digits.
    #[must_use]
    pub fn generated_code() -> String {
        let n: u32 = rand::thread_rng().gen_range(1000..10_000);

        format!("BRG-{n}")
    }
}

/// Sale price derived from a purchase price and a margin percentage,
/// rounded to the nearest unit.
#[must_use]
pub fn price_with_margin(purchase_price: u64, margin_pct: u64) -> u64 {
    purchase_price + (purchase_price * margin_pct + 50) / 100
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: u32,

    /// Display name.
    pub name: String,
}

/// A unit of measure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Unit {
    /// Unique unit identifier.
    pub id: u32,

    /// Display name, e.g. `"pcs"`.
    pub name: String,

    /// Units per package.
    pub value: u32,
}

/// HTTP client for the product management endpoints.
#[derive(Debug, Clone)]
pub struct ProductsClient {
    config: ApiConfig,
    http: Client,
}

impl ProductsClient {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// List every product.
    ///
    /// The endpoint sometimes answers with a single object instead of an
    /// array; both shapes are accepted.
    ///
    /// # Errors
    ///
    /// - [`ProductsError::Http`]: transport failure or undecodable body.
    /// - [`ProductsError::UnexpectedResponse`]: non-success status or a
    ///   body that is neither an array nor an object.
    pub async fn list(&self) -> Result<Vec<Product>, ProductsError> {
        let url = format!("{}/api/items", self.config.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(ProductsError::UnexpectedResponse(format!(
                "product list request failed with status {status}: {text}"
            )));
        }

        let body: Value = response.json().await?;

        parse_product_list(body)
    }

    /// Create a new product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Http`] on transport failure and
    /// [`ProductsError::UnexpectedResponse`] on a non-success status.
    pub async fn create(&self, draft: &ProductDraft) -> Result<(), ProductsError> {
        let url = format!("{}/api/items", self.config.base_url);

        let response = self.http.post(&url).json(draft).send().await?;

        expect_success(response, "product create").await
    }

    /// Update an existing product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Http`] on transport failure and
    /// [`ProductsError::UnexpectedResponse`] on a non-success status.
    pub async fn update(&self, id: u32, draft: &ProductDraft) -> Result<(), ProductsError> {
        let url = format!("{}/api/items/{id}", self.config.base_url);

        let response = self.http.put(&url).json(draft).send().await?;

        expect_success(response, "product update").await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Http`] on transport failure and
    /// [`ProductsError::UnexpectedResponse`] on a non-success status.
    pub async fn delete(&self, id: u32) -> Result<(), ProductsError> {
        let url = format!("{}/api/items/{id}", self.config.base_url);

        let response = self.http.delete(&url).send().await?;

        expect_success(response, "product delete").await
    }

    /// List every category.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Http`] on transport failure or an
    /// undecodable body.
    pub async fn categories(&self) -> Result<Vec<Category>, ProductsError> {
        let url = format!("{}/api/categories", self.config.base_url);

        let categories = self.http.get(&url).send().await?.json().await?;

        Ok(categories)
    }

    /// List every unit of measure.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsError::Http`] on transport failure or an
    /// undecodable body.
    pub async fn units(&self) -> Result<Vec<Unit>, ProductsError> {
        let url = format!("{}/api/units", self.config.base_url);

        let units = self.http.get(&url).send().await?.json().await?;

        Ok(units)
    }
}

fn parse_product_list(body: Value) -> Result<Vec<Product>, ProductsError> {
    match body {
        Value::Array(_) => serde_json::from_value(body)
            .map_err(|error| ProductsError::UnexpectedResponse(error.to_string())),
        Value::Object(_) => {
            let single: Product = serde_json::from_value(body)
                .map_err(|error| ProductsError::UnexpectedResponse(error.to_string()))?;

            Ok(vec![single])
        }
        other => Err(ProductsError::UnexpectedResponse(format!(
            "expected an array or object, got {other}"
        ))),
    }
}

async fn expect_success(response: reqwest::Response, operation: &str) -> Result<(), ProductsError> {
    if response.status().is_success() {
        return Ok(());
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(ProductsError::UnexpectedResponse(format!(
        "{operation} failed with status {status}: {text}"
    )))
}

/// Errors raised by the product management client.
#[derive(Debug, Error)]
pub enum ProductsError {
    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status or an unexpected
    /// body.
    #[error("unexpected response from product endpoint: {0}")]
    UnexpectedResponse(String),
}
