//! Field readers for uplink payloads
//!
//! All multi-byte integers on the EM410-RDL uplink are little-endian. The
//! signed readers reinterpret the unsigned value as two's complement.

use crate::util::hex::encode_hex;

pub fn read_u8(byte: u8) -> u8 {
    byte
}

pub fn read_i8(byte: u8) -> i8 {
    byte as i8
}

pub fn read_u16_le(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

pub fn read_i16_le(bytes: [u8; 2]) -> i16 {
    i16::from_le_bytes(bytes)
}

pub fn read_u32_le(bytes: [u8; 4]) -> u32 {
    u32::from_le_bytes(bytes)
}

pub fn read_i32_le(bytes: [u8; 4]) -> i32 {
    i32::from_le_bytes(bytes)
}

/// IPSO version: major in the high nibble, minor in the low nibble
pub fn read_protocol_version(byte: u8) -> String {
    format!("v{}.{}", byte >> 4, byte & 0x0f)
}

/// Hardware version: major byte, minor in the high nibble of the second byte
pub fn read_hardware_version(bytes: [u8; 2]) -> String {
    format!("v{}.{}", bytes[0], bytes[1] >> 4)
}

pub fn read_firmware_version(bytes: [u8; 2]) -> String {
    format!("v{}.{}", bytes[0], bytes[1])
}

pub fn read_tsl_version(bytes: [u8; 2]) -> String {
    format!("v{}.{}", bytes[0], bytes[1])
}

/// Serial number as lowercase hex, two digits per byte
pub fn read_serial_number(bytes: &[u8]) -> String {
    encode_hex(bytes)
}

/// Copy two bytes starting at `at` out of a width-checked record body.
pub(crate) fn pair(data: &[u8], at: usize) -> [u8; 2] {
    [data[at], data[at + 1]]
}

/// Copy four bytes starting at `at` out of a width-checked record body.
pub(crate) fn quad(data: &[u8], at: usize) -> [u8; 4] {
    [data[at], data[at + 1], data[at + 2], data[at + 3]]
}
