//! Hex quantity conversions.
//!
//! Ethereum JSON-RPC encodes block numbers as `0x`-prefixed hex quantities.
//! These helpers convert between that representation and `i64`.

use thiserror::Error;

/// Error converting a hex quantity to an integer
#[derive(Debug, Error)]
pub enum HexError {
	/// The input did not carry the mandatory `0x` prefix (covers empty input)
	#[error("hex quantity {0:?} is missing the '0x' prefix")]
	MissingPrefix(String),

	/// The digits after the prefix were empty, invalid, or overflowed i64
	#[error("invalid hex quantity {value:?}: {source}")]
	InvalidDigits {
		value: String,
		#[source]
		source: std::num::ParseIntError,
	},
}

/// Converts a `0x`-prefixed hex quantity into an `i64`
///
/// Fails on missing prefix, empty digits, non-hex characters, and values
/// exceeding the `i64` range.
pub fn hex_to_int(hex: &str) -> Result<i64, HexError> {
	let digits = hex
		.strip_prefix("0x")
		.ok_or_else(|| HexError::MissingPrefix(hex.to_string()))?;

	i64::from_str_radix(digits, 16).map_err(|source| HexError::InvalidDigits {
		value: hex.to_string(),
		source,
	})
}

/// Encodes a block number into the provider's `0x`-prefixed hex representation
pub fn int_to_hex(value: i64) -> String {
	format!("{:#x}", value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_hex_to_int_valid() {
		assert_eq!(hex_to_int("0x1b4").unwrap(), 436);
		assert_eq!(hex_to_int("0x0").unwrap(), 0);
		assert_eq!(hex_to_int("0x11c37937e08000").unwrap(), 5_000_000_000_000_000);
	}

	#[test]
	fn test_hex_to_int_empty_input() {
		let err = hex_to_int("").unwrap_err();
		assert!(matches!(err, HexError::MissingPrefix(_)));
	}

	#[test]
	fn test_hex_to_int_missing_prefix() {
		assert!(hex_to_int("1b4").is_err());
	}

	#[test]
	fn test_hex_to_int_empty_digits() {
		let err = hex_to_int("0x").unwrap_err();
		assert!(matches!(err, HexError::InvalidDigits { .. }));
	}

	#[test]
	fn test_hex_to_int_invalid_digits() {
		let err = hex_to_int("0xG").unwrap_err();
		assert!(matches!(err, HexError::InvalidDigits { .. }));
	}

	#[test]
	fn test_hex_to_int_overflow() {
		// 2^64 does not fit in an i64
		assert!(hex_to_int("0x10000000000000000").is_err());
		assert!(hex_to_int("0xffffffffffffffffff").is_err());
	}

	#[test]
	fn test_int_to_hex() {
		assert_eq!(int_to_hex(436), "0x1b4");
		assert_eq!(int_to_hex(0), "0x0");
	}

	#[test]
	fn test_round_trip() {
		for value in [0, 1, 436, 19_000_000] {
			assert_eq!(hex_to_int(&int_to_hex(value)).unwrap(), value);
		}
	}
}
