//! # Codec Error Handling
//!
//! This module defines the CodecError enum, the crate-level error returned by
//! the network server adapters and the CLI. The decoder and encoder each have
//! their own narrower error type which converts into it.

use thiserror::Error;

use crate::downlink::EncodeError;
use crate::uplink::DecodeError;

/// Represents the different error types that can occur in the codec crate.
#[derive(Debug, Error)]
pub enum CodecError {
    /// An uplink payload could not be decoded.
    #[error("Uplink decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A downlink command failed validation.
    #[error("Downlink encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// The downlink request is not a JSON object.
    #[error("Command request must be a JSON object")]
    NotAnObject,

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
