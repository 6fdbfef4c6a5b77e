//! Core Ethereum client interface.
//!
//! This module defines the two-method interface the sync engine consumes,
//! decoupling the polling loop from the concrete JSON-RPC transport.

use async_trait::async_trait;

use super::error::EthereumClientError;

/// Defines the core interface for Ethereum node access
///
/// This trait must be implemented by any client supplying block data to the
/// sync engine. The engine only ever needs the current head block number and
/// the raw transaction records of a specific block.
#[async_trait]
pub trait EthereumApi: Send + Sync {
	/// Retrieves the current head block number as a hex quantity
	///
	/// # Returns
	/// * `Result<String, EthereumClientError>` - `0x`-prefixed block number or an error
	async fn get_current_block(&self) -> Result<String, EthereumClientError>;

	/// Retrieves the raw transaction records of a block
	///
	/// # Arguments
	/// * `block_number` - `0x`-prefixed hex block number
	///
	/// # Returns
	/// * `Result<Vec<serde_json::Value>, EthereumClientError>` - Raw transaction
	///   records as returned by the node, or an error
	async fn get_transactions(
		&self,
		block_number: &str,
	) -> Result<Vec<serde_json::Value>, EthereumClientError>;
}
