//! # Downlink Encoding
//!
//! A downlink request is a JSON object mapping command names to parameters:
//!
//! ```json
//! { "report_interval": 20, "distance_range": { "mode": 0, "min": 0, "max": 1000 } }
//! ```
//!
//! Each recognized command becomes a fixed-width byte span. Spans are
//! concatenated in the order of [`COMMANDS`], whatever the key order of the
//! request. Unknown keys are ignored. The first invalid parameter fails the
//! whole request.
//!
//! ```rust
//! use em410_rdl::downlink::encode;
//! use serde_json::json;
//!
//! let request = json!({ "report_interval": 1440, "reboot": 1 });
//! let bytes = encode(request.as_object().unwrap()).unwrap();
//! assert_eq!(bytes, vec![0xff, 0x10, 0xff, 0xff, 0x8e, 0x00, 0xa0, 0x05]);
//! ```

pub mod commands;
pub mod params;

use log::{debug, warn};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::util::hex::format_hex_compact;
use crate::util::writer::WriterError;
use commands::{BOOLEAN, DISTANCE_MODES};
use params::{child, choice, field, number, optional_number};

/// Errors that can occur during downlink encoding
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodeError {
    #[error("{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be one of {}", join_allowed(.allowed))]
    NotOneOf {
        field: &'static str,
        allowed: &'static [i64],
    },

    #[error("{field} must be in range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{lower} must be less than or equal to {upper}")]
    InvalidOrder {
        lower: &'static str,
        upper: &'static str,
    },

    #[error("Command buffer overflow: {0}")]
    BufferOverflow(#[from] WriterError),
}

fn join_allowed(allowed: &[i64]) -> String {
    allowed
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

type Builder = fn(&Map<String, Value>) -> Result<Vec<u8>, EncodeError>;

/// One entry of the command table
#[derive(Debug, Clone, Copy)]
pub struct CommandEntry {
    /// Request keys that must all be present for the command to fire
    pub keys: &'static [&'static str],
    build: Builder,
}

impl CommandEntry {
    const fn new(keys: &'static [&'static str], build: Builder) -> Self {
        Self { keys, build }
    }

    fn applies_to(&self, request: &Map<String, Value>) -> bool {
        self.keys.iter().all(|key| request.contains_key(*key))
    }
}

/// Commands in output order
pub static COMMANDS: [CommandEntry; 23] = [
    CommandEntry::new(&["reboot"], reboot),
    CommandEntry::new(&["report_status"], report_status),
    CommandEntry::new(&["report_interval"], report_interval),
    CommandEntry::new(&["collection_interval"], collection_interval),
    CommandEntry::new(&["sync_time"], sync_time),
    CommandEntry::new(&["timezone"], timezone),
    CommandEntry::new(&["distance_range"], distance_range),
    CommandEntry::new(&["alarm_counts"], alarm_counts),
    CommandEntry::new(&["radar_temperature_calibration"], radar_temperature_calibration),
    CommandEntry::new(&["radar_blind_calibration"], radar_blind_calibration),
    CommandEntry::new(&["distance_calibration"], distance_calibration),
    CommandEntry::new(&["distance_mode"], distance_mode),
    CommandEntry::new(&["blind_detection_enable"], blind_detection_enable),
    CommandEntry::new(&["recollection_count", "recollection_interval"], recollection),
    CommandEntry::new(&["signal_quality"], signal_quality),
    CommandEntry::new(&["threshold_sensitive"], threshold_sensitive),
    CommandEntry::new(&["peak_sort"], peak_sort),
    CommandEntry::new(&["retransmit_config"], retransmit_config),
    CommandEntry::new(&["resend_interval"], resend_interval),
    CommandEntry::new(&["stop_transmit"], stop_transmit),
    CommandEntry::new(&["history_enable"], history_enable),
    CommandEntry::new(&["fetch_history"], fetch_history),
    CommandEntry::new(&["clear_history"], clear_history),
];

/// Encode a downlink request.
pub fn encode(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let mut encoded = Vec::new();

    for entry in COMMANDS.iter().filter(|entry| entry.applies_to(request)) {
        let span = (entry.build)(request).map_err(|err| {
            warn!("Rejecting downlink request: {err}");
            err
        })?;
        debug!("{} -> [{}]", entry.keys.join("+"), format_hex_compact(&span));
        encoded.extend_from_slice(&span);
    }

    Ok(encoded)
}

fn reboot(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::reboot(choice("reboot", field(request, "reboot"), BOOLEAN)?)
}

fn report_status(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::report_status(choice("report_status", field(request, "report_status"), BOOLEAN)?)
}

fn report_interval(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_report_interval(number("report_interval", field(request, "report_interval"))?)
}

fn collection_interval(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let seconds = number("collection_interval", field(request, "collection_interval"))?;
    commands::set_collection_interval(seconds)
}

fn sync_time(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::sync_time(choice("sync_time", field(request, "sync_time"), BOOLEAN)?)
}

fn timezone(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_timezone(number("timezone", field(request, "timezone"))?)
}

fn distance_range(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let range = field(request, "distance_range");
    let mode = choice("distance_range.mode", child(range, "mode"), DISTANCE_MODES)?;
    let min = number("distance_range.min", child(range, "min"))?;
    let max = number("distance_range.max", child(range, "max"))?;
    commands::set_distance_range(mode, min, max)
}

fn alarm_counts(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_alarm_counts(number("alarm_counts", field(request, "alarm_counts"))?)
}

fn radar_temperature_calibration(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let key = "radar_temperature_calibration";
    commands::set_radar_temperature_calibration(choice(key, field(request, key), BOOLEAN)?)
}

fn radar_blind_calibration(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let key = "radar_blind_calibration";
    commands::set_radar_blind_calibration(choice(key, field(request, key), BOOLEAN)?)
}

fn distance_calibration(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let calibration = field(request, "distance_calibration");
    let enable = choice("distance_calibration.enable", child(calibration, "enable"), BOOLEAN)?;
    let distance = number("distance_calibration.distance", child(calibration, "distance"))?;
    commands::set_distance_calibration(enable, distance)
}

fn distance_mode(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_distance_mode(choice("distance_mode", field(request, "distance_mode"), DISTANCE_MODES)?)
}

fn blind_detection_enable(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let key = "blind_detection_enable";
    commands::set_blind_detection_enable(choice(key, field(request, key), BOOLEAN)?)
}

fn recollection(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let count = number("recollection_count", field(request, "recollection_count"))?;
    let interval = number("recollection_interval", field(request, "recollection_interval"))?;
    commands::set_recollection(count, interval)
}

fn signal_quality(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_signal_quality(number("signal_quality", field(request, "signal_quality"))?)
}

fn threshold_sensitive(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let value = number("threshold_sensitive", field(request, "threshold_sensitive"))?;
    commands::set_threshold_sensitive(value)
}

fn peak_sort(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_peak_sort(choice("peak_sort", field(request, "peak_sort"), BOOLEAN)?)
}

fn retransmit_config(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let config = field(request, "retransmit_config");
    let enable = choice("retransmit_config.enable", child(config, "enable"), BOOLEAN)?;
    let interval = number("retransmit_config.interval", child(config, "interval"))?;
    commands::set_retransmit_config(enable, interval)
}

fn resend_interval(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_resend_interval(number("resend_interval", field(request, "resend_interval"))?)
}

fn stop_transmit(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::stop_transmit(choice("stop_transmit", field(request, "stop_transmit"), BOOLEAN)?)
}

fn history_enable(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::set_history_enable(choice("history_enable", field(request, "history_enable"), BOOLEAN)?)
}

fn fetch_history(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    let window = field(request, "fetch_history");
    let start_time = number("fetch_history.start_time", child(window, "start_time"))?;
    let end_time = optional_number("fetch_history.end_time", child(window, "end_time"))?;
    commands::fetch_history(start_time, end_time)
}

fn clear_history(request: &Map<String, Value>) -> Result<Vec<u8>, EncodeError> {
    commands::clear_history(choice("clear_history", field(request, "clear_history"), BOOLEAN)?)
}
