//! History records (channel 0x20, type 0xce)
//!
//! Each record is an 11 byte sample stored by the device and replayed after a
//! `fetch_history` downlink:
//!
//! | offset | width | field |
//! |---|---|---|
//! | 0 | 4 | timestamp, unix seconds |
//! | 4 | 2 | distance, mm, or a sentinel |
//! | 6 | 2 | temperature, 0.1 °C, or a sentinel |
//! | 8 | 2 | signed distance mutation |
//! | 10 | 1 | event flags |

use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::constants::{
    DISTANCE_DISABLED, DISTANCE_NO_TARGET, DISTANCE_SENSOR_EXCEPTION, TEMPERATURE_DISABLED,
    TEMPERATURE_SENSOR_EXCEPTION,
};
use crate::uplink::readers::{pair, quad, read_i16_le, read_u16_le, read_u32_le};

/// Width of one history record body
pub const HISTORY_RECORD_WIDTH: usize = 11;

bitflags! {
    /// Event flags of a history sample
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct HistoryEvent: u8 {
        const THRESHOLD_ALARM          = 0b0000_0001;
        const THRESHOLD_ALARM_RELEASE  = 0b0000_0010;
        const BLIND_SPOT_ALARM         = 0b0000_0100;
        const BLIND_SPOT_ALARM_RELEASE = 0b0000_1000;
        const MUTATION_ALARM           = 0b0001_0000;
        const TILT_ALARM               = 0b0010_0000;
    }
}

const EVENT_NAMES: [(HistoryEvent, &str); 6] = [
    (HistoryEvent::THRESHOLD_ALARM, "Threshold Alarm"),
    (HistoryEvent::THRESHOLD_ALARM_RELEASE, "Threshold Alarm Release"),
    (HistoryEvent::BLIND_SPOT_ALARM, "Blind Spot Alarm"),
    (HistoryEvent::BLIND_SPOT_ALARM_RELEASE, "Blind Spot Alarm Release"),
    (HistoryEvent::MUTATION_ALARM, "Mutation Alarm"),
    (HistoryEvent::TILT_ALARM, "Tilt Alarm"),
];

impl HistoryEvent {
    /// Bits 6 and 7 are reserved and dropped
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bits_truncate(byte)
    }

    /// Names of the set flags, lowest bit first
    pub fn names(&self) -> Vec<&'static str> {
        EVENT_NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

/// A history measurement that may carry a sensor state instead of a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample<T> {
    Value(T),
    NoTarget,
    SensorException,
    Disabled,
}

impl<T> Sample<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Sample::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Text used in the `*_exception` report fields
    pub fn exception(&self) -> Option<&'static str> {
        match self {
            Sample::Value(_) => None,
            Sample::NoTarget => Some("No Target"),
            Sample::SensorException => Some("Sensor Exception"),
            Sample::Disabled => Some("Disabled"),
        }
    }
}

impl Sample<u16> {
    pub fn distance_from_raw(raw: u16) -> Self {
        match raw {
            DISTANCE_NO_TARGET => Sample::NoTarget,
            DISTANCE_SENSOR_EXCEPTION => Sample::SensorException,
            DISTANCE_DISABLED => Sample::Disabled,
            mm => Sample::Value(mm),
        }
    }
}

impl Sample<f64> {
    /// `raw` holds the little-endian bytes of the temperature field
    pub fn temperature_from_raw(raw: [u8; 2]) -> Self {
        match read_u16_le(raw) {
            TEMPERATURE_DISABLED => Sample::Disabled,
            TEMPERATURE_SENSOR_EXCEPTION => Sample::SensorException,
            _ => Sample::Value(read_i16_le(raw) as f64 / 10.0),
        }
    }
}

/// One decoded history sample
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub timestamp: u32,
    pub distance: Sample<u16>,
    pub temperature: Sample<f64>,
    pub event: HistoryEvent,
    /// Present only when the mutation alarm flag is set
    pub distance_mutation: Option<i16>,
}

impl HistoryRecord {
    /// Parse an 11 byte record body.
    ///
    /// The caller guarantees `data.len() >= HISTORY_RECORD_WIDTH`.
    pub fn parse(data: &[u8]) -> Self {
        let event = HistoryEvent::from_byte(data[10]);
        let distance_mutation = event
            .contains(HistoryEvent::MUTATION_ALARM)
            .then(|| read_i16_le(pair(data, 8)));

        Self {
            timestamp: read_u32_le(quad(data, 0)),
            distance: Sample::distance_from_raw(read_u16_le(pair(data, 4))),
            temperature: Sample::temperature_from_raw(pair(data, 6)),
            event,
            distance_mutation,
        }
    }

    /// Sample time as UTC
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp as i64, 0)
    }
}

impl Serialize for HistoryRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("timestamp", &self.timestamp)?;

        match &self.distance {
            Sample::Value(mm) => map.serialize_entry("distance", mm)?,
            other => map.serialize_entry("distance_exception", &other.exception())?,
        }
        match &self.temperature {
            Sample::Value(celsius) => map.serialize_entry("temperature", celsius)?,
            other => map.serialize_entry("temperature_exception", &other.exception())?,
        }

        if !self.event.is_empty() {
            map.serialize_entry("event", &self.event.names())?;
        }
        if let Some(mutation) = self.distance_mutation {
            map.serialize_entry("distance_mutation", &mutation)?;
        }
        map.end()
    }
}
