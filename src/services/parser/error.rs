//! Parser error types.
//!
//! Provides error handling for the sync engine. Nothing in this taxonomy is
//! fatal: fetch and conversion failures are retried on a later iteration, a
//! shutdown timeout is reported to the caller of `stop()` and nowhere else.

use std::time::Duration;
use thiserror::Error;

use crate::{services::ethereum::EthereumClientError, utils::hex::HexError};

/// Sync engine error type
#[derive(Debug, Error)]
pub enum ParserError {
	/// Fetching the head block number failed; retried next cycle
	#[error("failed to fetch head block number: {0}")]
	HeadFetch(#[source] EthereumClientError),

	/// Fetching a block's transactions failed; the remaining catch-up range
	/// is aborted and retried next cycle
	#[error("failed to fetch transactions for block {block}: {source}")]
	BlockFetch {
		block: i64,
		#[source]
		source: EthereumClientError,
	},

	/// The head block number could not be converted to an integer
	#[error("failed to convert block number {value:?}: {source}")]
	Conversion {
		value: String,
		#[source]
		source: HexError,
	},

	/// The node returned zero transactions for a block
	///
	/// Deliberately coarse: an empty list is indistinguishable from a
	/// truncated response here, so the block is treated as failed and
	/// refetched on a later iteration.
	#[error("no transactions found in block {block}")]
	EmptyBlock { block: i64 },

	/// The sync loop did not acknowledge shutdown within the configured bound
	#[error("sync loop did not acknowledge shutdown within {timeout:?}")]
	ShutdownTimeout { timeout: Duration },
}
