//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for serial numbers in uplink reports, for rendering
//! payloads in log lines, and for reading payloads typed on the command line.
//!
//! ## Usage
//!
//! ```rust
//! use em410_rdl::util::hex::{encode_hex, decode_hex, format_hex_compact};
//!
//! let data = [0xff, 0x0b, 0x01];
//! let hex_str = encode_hex(&data);
//! assert_eq!(hex_str, "ff0b01");
//!
//! let decoded = decode_hex(&hex_str).unwrap();
//! assert_eq!(decoded, data);
//!
//! assert_eq!(format_hex_compact(&data), "ff 0b 01");
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if hex_str.is_empty() {
        return Err(HexError::EmptyString);
    }

    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "ff 0b 01" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex string that may contain spaces, separators or a `0x` prefix
///
/// More lenient than decode_hex: strips a leading `0x` and every non-hex
/// character.
pub fn parse_hex_lenient(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input
        .trim()
        .strip_prefix("0x")
        .or_else(|| input.trim().strip_prefix("0X"))
        .unwrap_or(input);

    let hex_chars: String = trimmed.chars().filter(|c| c.is_ascii_hexdigit()).collect();
    decode_hex(&hex_chars)
}
