//! # Uplink Decoding
//!
//! An uplink payload is a run of tagged records:
//!
//! ```text
//! [channel_id][channel_type][payload: width bytes] [channel_id][channel_type]...
//! ```
//!
//! The width is implied by the tag pair (see [`channel::CHANNELS`]). Decoding
//! walks the payload once, left to right. The first unrecognized tag pair ends
//! the walk without an error, so newer firmware can append channels that older
//! decoders skip. A recognized tag whose payload is cut short is reported as
//! [`DecodeError::Truncated`].
//!
//! ```rust
//! use em410_rdl::uplink::decode;
//!
//! let report = decode(&[0x01, 0x75, 0x64, 0x99, 0x99]).unwrap();
//! assert_eq!(report.battery, Some(100));
//! ```

pub mod channel;
pub mod history;
pub mod readers;
pub mod report;

use log::{debug, warn};
use nom::{bytes::complete::take, number::complete::u8 as parse_u8, sequence::tuple, IResult};
use thiserror::Error;

use crate::util::hex::format_hex_compact;
pub use channel::{lookup, Channel, CHANNELS};
pub use history::{HistoryEvent, HistoryRecord, Sample};
pub use report::{
    DistanceAlarm, DistanceEvent, DistanceException, EventKind, LoRaWanClass, Position, Report,
};

/// Errors that can occur during uplink decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(
        "Truncated {name} record (0x{channel_id:02x} 0x{channel_type:02x}) at offset {offset}: expected {expected} bytes, got {actual}"
    )]
    Truncated {
        name: &'static str,
        channel_id: u8,
        channel_type: u8,
        offset: usize,
        expected: usize,
        actual: usize,
    },
}

/// One tagged record located in a payload
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub channel: &'static Channel,
    /// Offset of the channel id byte
    pub offset: usize,
    /// Exactly `channel.width` bytes
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Bytes taken from the input, tag included
    pub fn span(&self) -> usize {
        2 + self.payload.len()
    }
}

/// Iterator over the recognized records of a payload.
///
/// Ends at the end of input, at the first unknown tag pair, or after yielding
/// a truncation error.
#[derive(Debug, Clone)]
pub struct Frames<'a> {
    input: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> Frames<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            offset: 0,
            done: false,
        }
    }

    /// Bytes consumed by the records yielded so far
    pub fn consumed(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<Frame<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let rest = &self.input[self.offset..];
        let header: IResult<&[u8], (u8, u8)> = tuple((parse_u8, parse_u8))(rest);
        let (body, (id, kind)) = match header {
            Ok(parsed) => parsed,
            Err(_) => {
                // End of input, or a lone byte that cannot form a tag
                if !rest.is_empty() {
                    debug!("Ignoring {} trailing byte(s) at offset {}", rest.len(), self.offset);
                }
                self.done = true;
                return None;
            }
        };

        let Some(channel) = lookup(id, kind) else {
            debug!(
                "Unknown channel 0x{id:02x} 0x{kind:02x} at offset {}, dropping: {}",
                self.offset,
                format_hex_compact(rest)
            );
            self.done = true;
            return None;
        };

        let taken: IResult<&[u8], &[u8]> = take(channel.width)(body);
        match taken {
            Ok((_, payload)) => {
                let frame = Frame {
                    channel,
                    offset: self.offset,
                    payload,
                };
                self.offset += frame.span();
                Some(Ok(frame))
            }
            Err(_) => {
                self.done = true;
                let err = DecodeError::Truncated {
                    name: channel.name,
                    channel_id: id,
                    channel_type: kind,
                    offset: self.offset,
                    expected: channel.width,
                    actual: body.len(),
                };
                warn!("{err}");
                Some(Err(err))
            }
        }
    }
}

/// Decode an uplink payload.
///
/// A truncated record fails the whole decode; use [`decode_partial`] to keep
/// the records that preceded it.
pub fn decode(bytes: &[u8]) -> Result<Report, DecodeError> {
    match decode_partial(bytes) {
        (report, None) => Ok(report),
        (_, Some(err)) => Err(err),
    }
}

/// Decode as much of an uplink payload as possible.
///
/// Returns the report built from every complete record, plus the truncation
/// error that stopped the walk, if any.
pub fn decode_partial(bytes: &[u8]) -> (Report, Option<DecodeError>) {
    let mut report = Report::default();

    for frame in Frames::new(bytes) {
        match frame {
            Ok(frame) => (frame.channel.apply)(frame.payload, &mut report),
            Err(err) => return (report, Some(err)),
        }
    }

    (report, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_status_only() {
        let report = decode(&[0xff, 0x0b, 0x01]).unwrap();
        assert_eq!(report.device_status, Some(1));
        assert_eq!(report.to_json(), serde_json::json!({ "device_status": 1 }));
    }

    #[test]
    fn test_unknown_tag_drops_tail() {
        let report = decode(&[0x01, 0x75, 0x64, 0x99, 0x99]).unwrap();
        assert_eq!(report.to_json(), serde_json::json!({ "battery": 100 }));

        // Known records after the unknown one are dropped too
        let report = decode(&[0x99, 0x99, 0x01, 0x75, 0x64]).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_and_lone_byte() {
        assert!(decode(&[]).unwrap().is_empty());
        let report = decode(&[0x01, 0x75, 0x50, 0xff]).unwrap();
        assert_eq!(report.battery, Some(0x50));
    }

    #[test]
    fn test_truncated_record() {
        let bytes = [0x01, 0x75, 0x64, 0x03, 0x67, 0x10];
        assert_eq!(
            decode(&bytes),
            Err(DecodeError::Truncated {
                name: "temperature",
                channel_id: 0x03,
                channel_type: 0x67,
                offset: 3,
                expected: 2,
                actual: 1,
            })
        );

        let (partial, err) = decode_partial(&bytes);
        assert_eq!(partial.battery, Some(100));
        assert!(err.is_some());
    }

    #[test]
    fn test_frames_track_offsets() {
        let bytes = [0xff, 0x0b, 0x01, 0x04, 0x82, 0xe8, 0x03, 0x99];
        let mut frames = Frames::new(&bytes);

        let first = frames.next().unwrap().unwrap();
        assert_eq!((first.offset, first.span()), (0, 3));
        let second = frames.next().unwrap().unwrap();
        assert_eq!((second.offset, second.payload), (3, &[0xe8, 0x03][..]));
        assert!(frames.next().is_none());
        assert_eq!(frames.consumed(), 7);
    }
}
