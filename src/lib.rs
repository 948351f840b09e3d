//! cbsrates Library
//!
//! Fetches, caches and prints the Central Bank of Seychelles daily exchange
//! rates. Modules are exposed for use in integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod rates;
