//! Ethereum node access.
//!
//! This module provides the interface and transport for talking to an
//! Ethereum node over JSON-RPC:
//! - The `EthereumApi` trait consumed by the sync engine
//! - A retrying HTTP transport implementation
//! - Error handling specific to RPC interactions

mod client;
mod error;
mod transport;

pub use client::EthereumApi;
pub use error::EthereumClientError;
pub use transport::{rpc_methods, EthereumClient};
