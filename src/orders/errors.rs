//! Order submission errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while submitting an order.
///
/// None of these are retried automatically. The cart is left untouched
/// on every failure so the user can retry manually.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The server could not be reached.
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// The server answered with a non-success status. The response body
    /// is logged for diagnostics when the error is raised.
    #[error("order submission rejected with status {status}")]
    Rejected {
        /// HTTP status returned by the server.
        status: StatusCode,
    },

    /// The server answered with a success status but a body that is not
    /// a receipt.
    #[error("unrecognized response format: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
