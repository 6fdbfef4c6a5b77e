//! Service implementations.
//!
//! - `ethereum`: RPC client interface and JSON-RPC transport
//! - `parser`: the sync engine (registry, index, poll loop)

pub mod ethereum;
pub mod parser;
