//! # Utility Modules
//!
//! This module provides common utility functions and types used throughout
//! the codec, including the fixed-capacity downlink byte writer and hex
//! encoding/decoding helpers.

pub mod hex;
pub mod writer;

// Re-export commonly used types and functions
pub use hex::{decode_hex, encode_hex, format_hex_compact, parse_hex_lenient, HexError};
pub use writer::{ByteWriter, WriterError};
