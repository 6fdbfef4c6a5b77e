//! Transaction data structures.
//!
//! Note: the raw records come from the Ethereum RPC implementation:
//! <https://ethereum.org/en/developers/docs/apis/json-rpc/#eth_getblockbynumber>

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single transaction observed in a processed block
///
/// Created only during block processing; never mutated or deleted afterwards.
/// `value` is kept as the provider's opaque hexadecimal string and is never
/// interpreted numerically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
	/// The transaction hash
	pub hash: String,

	/// Sender address, lower-cased
	pub from: String,

	/// Recipient address, lower-cased
	pub to: String,

	/// Transferred value as an opaque hexadecimal string
	pub value: String,

	/// The block this transaction was observed in
	pub block_number: i64,
}

/// Error extracting required fields from a raw transaction record
///
/// A record that fails to parse is skipped with a warning; the remaining
/// records in the same block are still processed.
#[derive(Debug, Error)]
pub enum TransactionParseError {
	/// The record is not a JSON object
	#[error("transaction record is not an object")]
	NotAnObject,

	/// A required field is absent or not a string
	#[error("transaction record is missing required field '{field}'")]
	MissingField { field: &'static str },
}

impl Transaction {
	/// Parses a raw RPC transaction record into a `Transaction`
	///
	/// Requires `hash`, `from`, `to`, and `value` to be present as strings.
	/// Contract creations carry no `to` field and are rejected here, matching
	/// the record-level skip policy of block processing. Addresses are
	/// lower-cased so the index key matches the normalized subscription key.
	///
	/// # Arguments
	/// * `raw` - Raw transaction record from `eth_getBlockByNumber`
	/// * `block_number` - The block the record was fetched from
	pub fn from_raw(
		raw: &serde_json::Value,
		block_number: i64,
	) -> Result<Self, TransactionParseError> {
		if !raw.is_object() {
			return Err(TransactionParseError::NotAnObject);
		}

		Ok(Transaction {
			hash: required_string(raw, "hash")?,
			from: required_string(raw, "from")?.to_lowercase(),
			to: required_string(raw, "to")?.to_lowercase(),
			value: required_string(raw, "value")?,
			block_number,
		})
	}
}

fn required_string(
	raw: &serde_json::Value,
	field: &'static str,
) -> Result<String, TransactionParseError> {
	raw.get(field)
		.and_then(|v| v.as_str())
		.map(str::to_string)
		.ok_or(TransactionParseError::MissingField { field })
}
