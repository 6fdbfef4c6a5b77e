//! Ethereum JSON-RPC transport implementation.
//!
//! This module provides the concrete `EthereumApi` implementation speaking
//! JSON-RPC over HTTP. Transient network failures are retried with
//! exponential backoff at the transport layer; everything above it sees a
//! single request/response exchange.

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::{json, Value};
use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::Duration,
};

use super::{client::EthereumApi, error::EthereumClientError};

/// Ethereum RPC method constants
pub mod rpc_methods {
	/// Get the current head block number
	pub const ETH_BLOCK_NUMBER: &str = "eth_blockNumber";
	/// Get block data (with full transaction objects) for a block number
	pub const ETH_GET_BLOCK_BY_NUMBER: &str = "eth_getBlockByNumber";
}

/// Per-request timeout for RPC calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Transient failures retried at the transport layer before surfacing
const MAX_TRANSPORT_RETRIES: u32 = 2;

/// A client for interacting with Ethereum nodes over JSON-RPC
///
/// Wraps a retrying `reqwest` client and handles request id assignment,
/// response decoding, and mapping of RPC error conditions into
/// `EthereumClientError` variants.
pub struct EthereumClient {
	/// The underlying HTTP client that handles actual RPC communications
	client: ClientWithMiddleware,
	/// JSON-RPC endpoint URL
	url: String,
	/// Monotonic id attached to each outgoing request
	request_id: AtomicU64,
}

impl EthereumClient {
	/// Creates a new Ethereum client for the given JSON-RPC endpoint
	pub fn new(url: impl Into<String>) -> Result<Self, EthereumClientError> {
		let retry_policy =
			ExponentialBackoff::builder().build_with_max_retries(MAX_TRANSPORT_RETRIES);
		let http_client = reqwest::Client::builder()
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(EthereumClientError::rpc_error)?;
		let client = ClientBuilder::new(http_client)
			.with(RetryTransientMiddleware::new_with_policy(retry_policy))
			.build();

		Ok(EthereumClient {
			client,
			url: url.into(),
			request_id: AtomicU64::new(1),
		})
	}

	/// Sends a JSON-RPC request and returns the decoded response body
	///
	/// Checks the HTTP status and the JSON-RPC `error` member before handing
	/// the body back to the caller.
	async fn send_request(
		&self,
		method: &'static str,
		params: Value,
	) -> Result<Value, EthereumClientError> {
		let request_body = json!({
			"jsonrpc": "2.0",
			"id": self.request_id.fetch_add(1, Ordering::Relaxed),
			"method": method,
			"params": params,
		});

		let response = self
			.client
			.post(&self.url)
			.json(&request_body)
			.send()
			.await
			.map_err(EthereumClientError::rpc_error)?;

		let status = response.status();
		if !status.is_success() {
			return Err(EthereumClientError::HttpStatus {
				status: status.as_u16(),
			});
		}

		let body: Value = response
			.json()
			.await
			.map_err(EthereumClientError::response_parse_error)?;

		if let Some(rpc_error) = body.get("error") {
			let code = rpc_error.get("code").and_then(|c| c.as_i64()).unwrap_or(0);
			let message = rpc_error
				.get("message")
				.and_then(|m| m.as_str())
				.unwrap_or("Unknown RPC error")
				.to_string();
			return Err(EthereumClientError::JsonRpc {
				method,
				code,
				message,
			});
		}

		Ok(body)
	}
}

#[async_trait]
impl EthereumApi for EthereumClient {
	async fn get_current_block(&self) -> Result<String, EthereumClientError> {
		let body = self
			.send_request(rpc_methods::ETH_BLOCK_NUMBER, json!([]))
			.await?;

		body.get("result")
			.and_then(|r| r.as_str())
			.map(str::to_string)
			.ok_or_else(|| {
				EthereumClientError::unexpected_response_structure(
					"missing or non-string 'result' field in eth_blockNumber response",
				)
			})
	}

	async fn get_transactions(
		&self,
		block_number: &str,
	) -> Result<Vec<Value>, EthereumClientError> {
		let body = self
			.send_request(
				rpc_methods::ETH_GET_BLOCK_BY_NUMBER,
				json!([block_number, true]),
			)
			.await?;

		let result = body.get("result").ok_or_else(|| {
			EthereumClientError::unexpected_response_structure(
				"missing 'result' field in eth_getBlockByNumber response",
			)
		})?;

		// The node returns null for blocks it does not (yet) know about
		if result.is_null() {
			return Err(EthereumClientError::block_not_available(
				block_number,
				"block data is null",
			));
		}

		result
			.get("transactions")
			.and_then(|txs| txs.as_array())
			.cloned()
			.ok_or_else(|| {
				EthereumClientError::unexpected_response_structure(
					"missing or non-array 'transactions' field in block data",
				)
			})
	}
}
