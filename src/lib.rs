//! Kasir
//!
//! Kasir is the client-side engine for a mobile point-of-sale register: an in-memory cart with stock-capped quantities, payment routing for cash and bank-transfer checkouts, and thin HTTP clients for the remote POS API.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod orders;
pub mod payment;
pub mod products;
pub mod reports;
pub mod sales;
pub mod settings;
