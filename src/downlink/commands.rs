//! Downlink command builders
//!
//! One function per device command. Each validates its arguments, then writes
//! a fixed-width span: a two byte opcode followed by little-endian
//! parameters. Trigger commands (`reboot`, `sync_time`, `stop_transmit`,
//! `clear_history`) produce no bytes when given 0.
//!
//! Numeric parameters are range-checked as given, fractions included, and
//! only then reduced to an integer: unsigned fields drop the fraction,
//! signed fields round toward negative infinity.
//!
//! ```rust
//! use em410_rdl::downlink::commands::{reboot, set_report_interval};
//!
//! assert_eq!(set_report_interval(1440.0).unwrap(), vec![0xff, 0x8e, 0x00, 0xa0, 0x05]);
//! assert!(set_report_interval(1440.5).is_err());
//! assert!(reboot(0).unwrap().is_empty());
//! ```

use crate::constants::*;
use crate::downlink::EncodeError;
use crate::util::writer::ByteWriter;

/// No / yes, disable / enable
pub const BOOLEAN: &[i64] = &[0, 1];

/// General, rain, dust
pub const DISTANCE_MODES: &[i64] = &[0, 1, 2];

pub(crate) fn check_choice(
    name: &'static str,
    value: i64,
    allowed: &'static [i64],
) -> Result<i64, EncodeError> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(EncodeError::NotOneOf {
            field: name,
            allowed,
        })
    }
}

/// Range check on the raw number, then the integer part
pub(crate) fn check_range(
    name: &'static str,
    value: f64,
    min: i64,
    max: i64,
) -> Result<i64, EncodeError> {
    if (min as f64..=max as f64).contains(&value) {
        Ok(unsigned(value))
    } else {
        Err(EncodeError::OutOfRange {
            field: name,
            min,
            max,
        })
    }
}

fn unsigned(value: f64) -> i64 {
    value.trunc() as i64
}

fn signed(value: f64) -> i64 {
    value.floor() as i64
}

/// `[prefix, opcode, 0xff]` for 1, nothing for 0
fn trigger(name: &'static str, value: i64, prefix: u8, opcode: u8) -> Result<Vec<u8>, EncodeError> {
    if check_choice(name, value, BOOLEAN)? == 0 {
        return Ok(Vec::new());
    }
    Ok(vec![prefix, opcode, TRIGGER_MAGIC])
}

/// `[prefix, opcode, value]`
fn single_byte(prefix: u8, opcode: u8, value: i64) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = ByteWriter::new(3);
    buffer.write_u8(prefix as i64)?;
    buffer.write_u8(opcode as i64)?;
    buffer.write_u8(value)?;
    Ok(buffer.into_bytes())
}

/// `[prefix, opcode, u16 le]`
fn single_u16(prefix: u8, opcode: u8, value: i64) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = ByteWriter::new(4);
    buffer.write_u8(prefix as i64)?;
    buffer.write_u8(opcode as i64)?;
    buffer.write_u16_le(value)?;
    Ok(buffer.into_bytes())
}

/// `[prefix, opcode, i16 le]`
fn single_i16(prefix: u8, opcode: u8, value: i64) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = ByteWriter::new(4);
    buffer.write_u8(prefix as i64)?;
    buffer.write_u8(opcode as i64)?;
    buffer.write_i16_le(value)?;
    Ok(buffer.into_bytes())
}

pub fn reboot(reboot: i64) -> Result<Vec<u8>, EncodeError> {
    trigger("reboot", reboot, PREFIX_CONFIG, OP_REBOOT)
}

/// Ask the device to report its status now
pub fn report_status(report_status: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("report_status", report_status, BOOLEAN)?;
    single_byte(PREFIX_CONFIG, OP_REPORT_STATUS, value)
}

/// Report interval in minutes, `[1, 1440]`
pub fn set_report_interval(report_interval: f64) -> Result<Vec<u8>, EncodeError> {
    let minutes = check_range("report_interval", report_interval, 1, 1440)?;

    let mut buffer = ByteWriter::new(5);
    buffer.write_u8(PREFIX_CONFIG as i64)?;
    buffer.write_u8(OP_REPORT_INTERVAL as i64)?;
    buffer.write_u8(0x00)?;
    buffer.write_u16_le(minutes)?;
    Ok(buffer.into_bytes())
}

/// Collection interval in seconds, `[10, 60]`
pub fn set_collection_interval(collection_interval: f64) -> Result<Vec<u8>, EncodeError> {
    let seconds = check_range("collection_interval", collection_interval, 10, 60)?;
    single_u16(PREFIX_CONFIG, OP_COLLECTION_INTERVAL, seconds)
}

pub fn sync_time(sync_time: i64) -> Result<Vec<u8>, EncodeError> {
    trigger("sync_time", sync_time, PREFIX_CONFIG, OP_SYNC_TIME)
}

/// Timezone offset in hours, sent as signed minutes
pub fn set_timezone(hours: f64) -> Result<Vec<u8>, EncodeError> {
    single_i16(PREFIX_CONFIG, OP_TIMEZONE, signed(hours * 60.0))
}

/// Detection range in mm for the given distance mode
pub fn set_distance_range(mode: i64, min: f64, max: f64) -> Result<Vec<u8>, EncodeError> {
    let mode = check_choice("distance_range.mode", mode, DISTANCE_MODES)?;
    if min > max {
        return Err(EncodeError::InvalidOrder {
            lower: "distance_range.min",
            upper: "distance_range.max",
        });
    }

    let mut buffer = ByteWriter::new(7);
    buffer.write_u8(PREFIX_CONFIG as i64)?;
    buffer.write_u8(OP_DISTANCE_RANGE as i64)?;
    buffer.write_u8(mode)?;
    buffer.write_u16_le(unsigned(min))?;
    buffer.write_u16_le(unsigned(max))?;
    Ok(buffer.into_bytes())
}

/// Consecutive threshold hits before an alarm is raised, `[1, 1000]`
pub fn set_alarm_counts(alarm_counts: f64) -> Result<Vec<u8>, EncodeError> {
    let counts = check_range("alarm_counts", alarm_counts, 1, 1000)?;
    single_u16(PREFIX_CONFIG, OP_ALARM_COUNTS, counts)
}

pub fn set_radar_temperature_calibration(value: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("radar_temperature_calibration", value, BOOLEAN)?;
    single_byte(PREFIX_CONFIG, OP_RADAR_CALIBRATION, value)
}

pub fn set_radar_blind_calibration(value: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("radar_blind_calibration", value, BOOLEAN)?;
    single_byte(PREFIX_CONFIG, OP_RADAR_CALIBRATION, value)
}

/// Distance offset calibration in mm.
///
/// The firmware expects a 6 byte span; the last byte is always zero.
pub fn set_distance_calibration(enable: i64, distance: f64) -> Result<Vec<u8>, EncodeError> {
    let enable = check_choice("distance_calibration.enable", enable, BOOLEAN)?;

    let mut buffer = ByteWriter::new(6);
    buffer.write_u8(PREFIX_CONFIG as i64)?;
    buffer.write_u8(OP_DISTANCE_CALIBRATION as i64)?;
    buffer.write_u8(enable)?;
    buffer.write_u16_le(unsigned(distance))?;
    Ok(buffer.into_bytes())
}

/// 0: general, 1: rain, 2: dust
pub fn set_distance_mode(distance_mode: i64) -> Result<Vec<u8>, EncodeError> {
    let mode = check_choice("distance_mode", distance_mode, DISTANCE_MODES)?;
    single_byte(PREFIX_RADAR, OP_DISTANCE_MODE, mode)
}

pub fn set_blind_detection_enable(value: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("blind_detection_enable", value, BOOLEAN)?;
    single_byte(PREFIX_RADAR, OP_BLIND_DETECTION, value)
}

/// Re-measure `count` times (`[1, 3]`), `interval` seconds apart (`[1, 10]`)
pub fn set_recollection(count: f64, interval: f64) -> Result<Vec<u8>, EncodeError> {
    let count = check_range("recollection_count", count, 1, 3)?;
    let interval = check_range("recollection_interval", interval, 1, 10)?;

    let mut buffer = ByteWriter::new(4);
    buffer.write_u8(PREFIX_CONFIG as i64)?;
    buffer.write_u8(OP_RECOLLECTION as i64)?;
    buffer.write_u8(count)?;
    buffer.write_u8(interval)?;
    Ok(buffer.into_bytes())
}

/// Minimum radar signal quality, raw signed value
pub fn set_signal_quality(signal_quality: f64) -> Result<Vec<u8>, EncodeError> {
    single_i16(PREFIX_RADAR, OP_SIGNAL_QUALITY, signed(signal_quality))
}

/// Detection threshold, sent in tenths
pub fn set_threshold_sensitive(threshold_sensitive: f64) -> Result<Vec<u8>, EncodeError> {
    single_i16(
        PREFIX_RADAR,
        OP_THRESHOLD_SENSITIVE,
        signed(threshold_sensitive * 10.0),
    )
}

/// 0: latest peak, 1: strongest peak
pub fn set_peak_sort(peak_sort: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("peak_sort", peak_sort, BOOLEAN)?;
    single_byte(PREFIX_RADAR, OP_PEAK_SORT, value)
}

/// Retransmission of unconfirmed reports, interval in seconds `[30, 1200]`
pub fn set_retransmit_config(enable: i64, interval: f64) -> Result<Vec<u8>, EncodeError> {
    let enable = check_choice("retransmit_config.enable", enable, BOOLEAN)?;
    let interval = check_range("retransmit_config.interval", interval, 30, 1200)?;

    let mut buffer = ByteWriter::new(5);
    buffer.write_u8(PREFIX_RADAR as i64)?;
    buffer.write_u8(OP_RETRANSMIT_CONFIG as i64)?;
    buffer.write_u8(enable)?;
    buffer.write_u16_le(interval)?;
    Ok(buffer.into_bytes())
}

/// History resend interval in seconds, `[30, 1200]`
pub fn set_resend_interval(resend_interval: f64) -> Result<Vec<u8>, EncodeError> {
    let seconds = check_range("resend_interval", resend_interval, 30, 1200)?;
    single_u16(PREFIX_RADAR, OP_RESEND_INTERVAL, seconds)
}

/// Stop an ongoing history transmission
pub fn stop_transmit(stop_transmit: i64) -> Result<Vec<u8>, EncodeError> {
    trigger("stop_transmit", stop_transmit, PREFIX_CONFIG, OP_STOP_TRANSMIT)
}

pub fn set_history_enable(history_enable: i64) -> Result<Vec<u8>, EncodeError> {
    let value = check_choice("history_enable", history_enable, BOOLEAN)?;
    single_byte(PREFIX_CONFIG, OP_HISTORY_ENABLE, value)
}

/// Request stored history.
///
/// Without an end time the device replays everything from `start_time` on
/// (6 byte span); with one it replays the closed range (10 byte span).
pub fn fetch_history(start_time: f64, end_time: Option<f64>) -> Result<Vec<u8>, EncodeError> {
    match end_time {
        None => {
            let mut buffer = ByteWriter::new(6);
            buffer.write_u8(PREFIX_HISTORY as i64)?;
            buffer.write_u8(OP_FETCH_HISTORY_FROM as i64)?;
            buffer.write_u32_le(unsigned(start_time))?;
            Ok(buffer.into_bytes())
        }
        Some(end_time) => {
            if start_time > end_time {
                return Err(EncodeError::InvalidOrder {
                    lower: "fetch_history.start_time",
                    upper: "fetch_history.end_time",
                });
            }

            let mut buffer = ByteWriter::new(10);
            buffer.write_u8(PREFIX_HISTORY as i64)?;
            buffer.write_u8(OP_FETCH_HISTORY_RANGE as i64)?;
            buffer.write_u32_le(unsigned(start_time))?;
            buffer.write_u32_le(unsigned(end_time))?;
            Ok(buffer.into_bytes())
        }
    }
}

/// Wipe stored history
pub fn clear_history(clear_history: i64) -> Result<Vec<u8>, EncodeError> {
    if check_choice("clear_history", clear_history, BOOLEAN)? == 0 {
        return Ok(Vec::new());
    }
    single_byte(PREFIX_CONFIG, OP_CLEAR_HISTORY, 1)
}
