//! # em410-rdl - Payload Codec for the Milesight EM410-RDL Radar Distance Sensor
//!
//! The em410-rdl crate converts between the binary LoRaWAN payloads of the
//! EM410-RDL radar level sensor and structured JSON.
//!
//! ## Features
//!
//! - Decode uplink payloads into a [`Report`]: device attributes, battery, temperature, distance, tilt position
//! - Decode distance alarm, mutation and exception events
//! - Decode stored history records with their event flags
//! - Encode configuration and control commands from a JSON request into a downlink payload
//! - Validate every command parameter before anything is emitted
//! - Adapters for the ChirpStack v3, ChirpStack v4 and The Things Network codec conventions
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! To use the em410-rdl crate in your Rust project, add the following to your Cargo.toml file:
//!
//! ```toml
//! [dependencies]
//! em410-rdl = "1.0.0"
//! ```
//!
//! Then decode and encode payloads:
//!
//! ```rust
//! use em410_rdl::{decode, encode};
//! use serde_json::json;
//!
//! let report = decode(&[0x01, 0x75, 0x5c, 0x04, 0x82, 0xe8, 0x03]).unwrap();
//! assert_eq!(report.battery, Some(92));
//! assert_eq!(report.distance, Some(1000));
//!
//! let request = json!({ "reboot": 1 });
//! assert_eq!(encode(request.as_object().unwrap()).unwrap(), vec![0xff, 0x10, 0xff]);
//! ```

pub mod adapters;
pub mod constants;
pub mod downlink;
pub mod error;
pub mod logging;
pub mod uplink;
pub mod util;

pub use crate::error::CodecError;
pub use crate::logging::{init_logger, log_info};

// Uplink
pub use uplink::{
    decode, decode_partial, DecodeError, DistanceAlarm, DistanceEvent, DistanceException,
    EventKind, HistoryEvent, HistoryRecord, LoRaWanClass, Position, Report, Sample,
};

// Downlink
pub use downlink::{encode, EncodeError};

// Network server adapters
pub use adapters::{
    decode_uplink, encode_downlink, DownlinkInput, DownlinkOutput, UplinkInput, UplinkOutput,
};

/// Decode a hex-encoded uplink payload.
///
/// Whitespace, separators and a `0x` prefix are tolerated.
///
/// # Arguments
/// * `hex` - Payload as hex text, e.g. `"ff0b01 0175 64"`
///
/// # Returns
/// * `Ok(Report)` - Decoded report
/// * `Err(CodecError)` - Malformed hex or truncated payload
pub fn decode_hex_payload(hex: &str) -> Result<Report, CodecError> {
    let bytes = util::parse_hex_lenient(hex).map_err(|_| CodecError::InvalidHexString)?;
    Ok(decode(&bytes)?)
}

/// Encode a downlink request given as JSON text.
///
/// # Arguments
/// * `json` - Request object, e.g. `{"report_interval": 20}`
///
/// # Returns
/// * `Ok(Vec<u8>)` - Downlink payload
/// * `Err(CodecError)` - Malformed JSON, non-object request or invalid parameter
pub fn encode_json_request(json: &str) -> Result<Vec<u8>, CodecError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let request = value.as_object().ok_or(CodecError::NotAnObject)?;
    Ok(encode(request)?)
}
