//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines specific metrics for the sync engine.

use lazy_static::lazy_static;
use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};

lazy_static! {
	/// Global Prometheus registry.
	///
	/// This registry holds all metrics defined in this module and is used
	/// to gather metrics for exposure via the metrics endpoint.
	pub static ref REGISTRY: Registry = Registry::new();

	/// Gauge for the sync engine watermark.
	///
	/// Tracks the last block number fully processed by the sync engine
	/// (-1 until the first head fetch succeeds).
	pub static ref CURRENT_BLOCK: Gauge = {
		let gauge = Gauge::new("current_block", "Last fully processed block number").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Counter for processed blocks.
	///
	/// Counts every block whose transactions were fetched, parsed, and merged
	/// into the index.
	pub static ref BLOCKS_PROCESSED: IntCounter = {
		let counter = IntCounter::new("blocks_processed_total", "Total number of processed blocks").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Counter for indexed transactions.
	///
	/// Counts every transaction appended to the index (each parsed record
	/// counts once, regardless of how many address keys it lands under).
	pub static ref TRANSACTIONS_INDEXED: IntCounter = {
		let counter = IntCounter::new("transactions_indexed_total", "Total number of indexed transactions").unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Gauge for subscribed addresses.
	///
	/// Tracks the current size of the subscription set.
	pub static ref SUBSCRIPTIONS: Gauge = {
		let gauge = Gauge::new("subscriptions", "Number of subscribed addresses").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};
}

/// Gathers all registered metrics in the Prometheus text exposition format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
