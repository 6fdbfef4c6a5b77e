//! A service that watches the Ethereum blockchain and records per-address
//! transaction histories for subscribed addresses.
//!
//! # Architecture
//!
//! The crate is organized into the following main modules:
//!
//! - `api`: HTTP surface over the sync engine
//! - `models`: domain models and configuration
//! - `services`: RPC client and the sync engine
//! - `utils`: hex conversions and metrics

pub mod api;
pub mod models;
pub mod services;
pub mod utils;
