//! Utility modules for common functionality.
//!
//! - `hex`: hex quantity <-> integer conversions for the RPC block encoding
//! - `metrics`: prometheus registry and engine metrics

pub mod hex;
pub mod metrics;

pub use hex::{hex_to_int, int_to_hex, HexError};
