//! # Network Server Adapters
//!
//! Thin wrappers that present the codec in the calling conventions of the
//! LoRaWAN network servers. All of them delegate to [`crate::uplink::decode`]
//! and [`crate::downlink::encode`]; the port number is accepted and ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::downlink;
use crate::error::CodecError;
use crate::uplink::{self, Report};

/// ChirpStack v4 uplink input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UplinkInput {
    pub bytes: Vec<u8>,
    #[serde(rename = "fPort", default, skip_serializing_if = "Option::is_none")]
    pub f_port: Option<u8>,
}

/// ChirpStack v4 uplink output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UplinkOutput {
    pub data: Report,
}

/// ChirpStack v4 downlink input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownlinkInput {
    pub data: Value,
}

/// ChirpStack v4 downlink output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownlinkOutput {
    pub bytes: Vec<u8>,
}

/// ChirpStack v4 `decodeUplink`
pub fn decode_uplink(input: &UplinkInput) -> Result<UplinkOutput, CodecError> {
    let data = uplink::decode(&input.bytes)?;
    Ok(UplinkOutput { data })
}

/// ChirpStack v4 `encodeDownlink`
pub fn encode_downlink(input: &DownlinkInput) -> Result<DownlinkOutput, CodecError> {
    let request = as_request(&input.data)?;
    let bytes = downlink::encode(request)?;
    Ok(DownlinkOutput { bytes })
}

fn as_request(value: &Value) -> Result<&Map<String, Value>, CodecError> {
    value.as_object().ok_or(CodecError::NotAnObject)
}

/// ChirpStack v3 `Decode(fPort, bytes)` / `Encode(fPort, obj)`
pub mod chirpstack_v3 {
    use super::*;

    pub fn decode(_f_port: u8, bytes: &[u8]) -> Result<Report, CodecError> {
        Ok(uplink::decode(bytes)?)
    }

    pub fn encode(_f_port: u8, obj: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(downlink::encode(as_request(obj)?)?)
    }
}

/// The Things Network `Decoder(bytes, port)` / `Encoder(obj, port)`
pub mod ttn {
    use super::*;

    pub fn decoder(bytes: &[u8], _port: u8) -> Result<Report, CodecError> {
        Ok(uplink::decode(bytes)?)
    }

    pub fn encoder(obj: &Value, _port: u8) -> Result<Vec<u8>, CodecError> {
        Ok(downlink::encode(as_request(obj)?)?)
    }
}
