//! # ByteWriter - Fixed-Capacity Little-Endian Writer
//!
//! Every downlink command is a fixed-width byte span agreed with the device
//! firmware. `ByteWriter` is allocated with that width, zero-filled, and
//! written front to back with a monotonic cursor.
//!
//! All writes mask the value to the field width, so out-of-range values
//! silently truncate. Range checks belong to the command builders.
//!
//! ## Usage
//!
//! ```rust
//! use em410_rdl::util::ByteWriter;
//!
//! let mut writer = ByteWriter::new(5);
//! writer.write_u8(0xff).unwrap();
//! writer.write_u8(0x8e).unwrap();
//! writer.write_u8(0x00).unwrap();
//! writer.write_u16_le(1440).unwrap();
//! assert_eq!(writer.into_bytes(), vec![0xff, 0x8e, 0x00, 0xa0, 0x05]);
//! ```

use bytes::{BufMut, BytesMut};
use thiserror::Error;

/// Errors that can occur during ByteWriter operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WriterError {
    #[error("Insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: usize, available: usize },
}

/// Fixed-capacity output buffer with a write cursor
#[derive(Debug, Clone)]
pub struct ByteWriter {
    buf: BytesMut,
    capacity: usize,
}

impl ByteWriter {
    /// Create a writer for a span of exactly `capacity` bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Current cursor position
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    /// Total span width
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes left before the span is full
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    fn reserve(&self, width: usize) -> Result<(), WriterError> {
        if width > self.remaining() {
            return Err(WriterError::InsufficientCapacity {
                requested: width,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn write_u8(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(1)?;
        self.buf.put_u8((value & 0xff) as u8);
        Ok(())
    }

    pub fn write_i8(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(1)?;
        self.buf.put_i8(value as i8);
        Ok(())
    }

    pub fn write_u16_le(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(2)?;
        self.buf.put_u16_le((value & 0xffff) as u16);
        Ok(())
    }

    pub fn write_i16_le(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(2)?;
        self.buf.put_i16_le(value as i16);
        Ok(())
    }

    pub fn write_u32_le(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(4)?;
        self.buf.put_u32_le((value & 0xffff_ffff) as u32);
        Ok(())
    }

    pub fn write_i32_le(&mut self, value: i64) -> Result<(), WriterError> {
        self.reserve(4)?;
        self.buf.put_i32_le(value as i32);
        Ok(())
    }

    /// Consume the writer, returning the full span
    ///
    /// Bytes past the cursor keep their zero fill.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.resize(self.capacity, 0);
        self.buf.to_vec()
    }
}
