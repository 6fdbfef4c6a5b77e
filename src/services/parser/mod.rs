//! Sync engine implementation.
//!
//! This module provides the block-polling/synchronization engine:
//! - Subscription registry and per-address transaction index
//! - Polling loop tracking the watermark against the remote head
//! - Cooperative stop with a bounded acknowledgment wait
//! - Error handling specific to sync operations

mod engine;
mod error;

pub use engine::Parser;
pub use error::ParserError;
