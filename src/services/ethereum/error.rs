//! Ethereum client error types.
//!
//! Provides error handling for JSON-RPC requests, response parsing, and
//! Ethereum-specific error conditions.

use thiserror::Error;

/// Ethereum client error type
#[derive(Debug, Error)]
pub enum EthereumClientError {
	/// Failure in making an RPC request
	#[error("Ethereum RPC request failed: {0}")]
	RpcError(String),

	/// The node answered with a non-success HTTP status
	#[error("Ethereum RPC returned HTTP status {status}")]
	HttpStatus { status: u16 },

	/// The node answered with a JSON-RPC error object
	#[error("Ethereum RPC request failed for method '{method}': {message} (code {code})")]
	JsonRpc {
		method: &'static str,
		code: i64,
		message: String,
	},

	/// Failure in decoding the RPC response body
	#[error("failed to parse Ethereum RPC response: {0}")]
	ResponseParseError(String),

	/// The response does not match the expected structure
	#[error("unexpected response structure from Ethereum RPC: {0}")]
	UnexpectedResponseStructure(String),

	/// Block data not available for the requested number
	#[error("block not available for {block_number}: {reason}")]
	BlockNotAvailable {
		block_number: String,
		reason: String,
	},
}

impl EthereumClientError {
	/// Creates an RPC error from an underlying transport failure
	pub fn rpc_error(err: impl std::fmt::Display) -> Self {
		Self::RpcError(err.to_string())
	}

	/// Creates a response parse error
	pub fn response_parse_error(err: impl std::fmt::Display) -> Self {
		Self::ResponseParseError(err.to_string())
	}

	/// Creates an unexpected response structure error
	pub fn unexpected_response_structure(msg: impl Into<String>) -> Self {
		Self::UnexpectedResponseStructure(msg.into())
	}

	/// Creates a block not available error
	pub fn block_not_available(block_number: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::BlockNotAvailable {
			block_number: block_number.into(),
			reason: reason.into(),
		}
	}

	/// Checks if this is a block not available error
	pub fn is_block_not_available(&self) -> bool {
		matches!(self, Self::BlockNotAvailable { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rpc_error_formatting() {
		let error = EthereumClientError::rpc_error("connection refused");
		assert_eq!(
			error.to_string(),
			"Ethereum RPC request failed: connection refused"
		);
	}

	#[test]
	fn test_http_status_formatting() {
		let error = EthereumClientError::HttpStatus { status: 429 };
		assert_eq!(error.to_string(), "Ethereum RPC returned HTTP status 429");
	}

	#[test]
	fn test_json_rpc_error_formatting() {
		let error = EthereumClientError::JsonRpc {
			method: "eth_blockNumber",
			code: -32602,
			message: "invalid params".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Ethereum RPC request failed for method 'eth_blockNumber': invalid params (code -32602)"
		);
	}

	#[test]
	fn test_block_not_available_formatting() {
		let error = EthereumClientError::block_not_available("0x1b4", "block data is null");
		assert_eq!(
			error.to_string(),
			"block not available for 0x1b4: block data is null"
		);
		assert!(error.is_block_not_available());
	}

	#[test]
	fn test_error_type_checks() {
		let error = EthereumClientError::rpc_error("boom");
		assert!(!error.is_block_not_available());
	}
}
