//! Domain models and data structures.
//!
//! This module contains the core data structures used throughout the application:
//!
//! - `config`: Runtime configuration injected into the engine and server
//! - `transaction`: Transaction records and their strict parse step

mod config;
mod transaction;

pub use config::ParserConfig;
pub use transaction::{Transaction, TransactionParseError};
