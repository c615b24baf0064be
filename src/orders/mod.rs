//! Order submission

pub mod errors;
pub mod gateway;
pub mod models;

pub use errors::OrderError;
pub use gateway::*;
pub use models::{OrderItem, OrderReceipt, OrderRequest};
