//! Runtime configuration for the parser service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration injected into the sync engine and the HTTP server
///
/// The intervals are cooperative backoff/throttle knobs: operators trade
/// catch-up latency against the remote node's rate-limit budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
	/// JSON-RPC endpoint of the Ethereum node
	pub rpc_url: String,

	/// Address the HTTP API binds to
	pub listen_addr: String,

	/// Pause between poll iterations (and before retrying after a failure)
	pub poll_interval: Duration,

	/// Pause between consecutive blocks within a catch-up batch
	pub block_interval: Duration,

	/// How long `stop()` waits for the loop to acknowledge shutdown
	pub stop_timeout: Duration,

	/// Grace period for draining in-flight HTTP requests on shutdown
	pub http_shutdown_timeout: Duration,
}

impl Default for ParserConfig {
	fn default() -> Self {
		ParserConfig {
			rpc_url: "https://cloudflare-eth.com".to_string(),
			listen_addr: "0.0.0.0:8080".to_string(),
			poll_interval: Duration::from_secs(5),
			block_interval: Duration::from_millis(500),
			stop_timeout: Duration::from_secs(60),
			http_shutdown_timeout: Duration::from_secs(5),
		}
	}
}
