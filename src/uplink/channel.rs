//! Channel dispatch table
//!
//! Every uplink record starts with a `(channel_id, channel_type)` pair that
//! fixes both the meaning and the width of the bytes that follow. The table
//! below is the single source of truth for both.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::constants::*;
use crate::uplink::history::{HistoryRecord, HISTORY_RECORD_WIDTH};
use crate::uplink::readers::{
    pair, read_firmware_version, read_hardware_version, read_i16_le, read_protocol_version,
    read_serial_number, read_tsl_version, read_u16_le, read_u8,
};
use crate::uplink::report::{
    DistanceAlarm, DistanceEvent, DistanceException, EventKind, LoRaWanClass, Position, Report,
};

/// A known uplink channel
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    pub id: u8,
    pub kind: u8,
    /// Short label used in logs and errors
    pub name: &'static str,
    /// Payload width following the two tag bytes
    pub width: usize,
    /// Folds a payload of exactly `width` bytes into the report
    pub apply: fn(&[u8], &mut Report),
}

impl Channel {
    const fn new(
        id: u8,
        kind: u8,
        name: &'static str,
        width: usize,
        apply: fn(&[u8], &mut Report),
    ) -> Self {
        Self {
            id,
            kind,
            name,
            width,
            apply,
        }
    }
}

/// All channels emitted by the EM410-RDL firmware
pub static CHANNELS: [Channel; 15] = [
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_DEVICE_STATUS, "device_status", 1, device_status),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_IPSO_VERSION, "ipso_version", 1, ipso_version),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_SERIAL_NUMBER, "sn", 8, serial_number),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_HARDWARE_VERSION, "hardware_version", 2, hardware_version),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_FIRMWARE_VERSION, "firmware_version", 2, firmware_version),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_LORAWAN_CLASS, "lorawan_class", 1, lorawan_class),
    Channel::new(CHANNEL_ATTRIBUTE, TYPE_TSL_VERSION, "tsl_version", 2, tsl_version),
    Channel::new(CHANNEL_BATTERY, TYPE_BATTERY, "battery", 1, battery),
    Channel::new(CHANNEL_TEMPERATURE, TYPE_TEMPERATURE, "temperature", 2, temperature),
    Channel::new(CHANNEL_DISTANCE, TYPE_DISTANCE, "distance", 2, distance),
    Channel::new(CHANNEL_POSITION, TYPE_POSITION, "position", 1, position),
    Channel::new(CHANNEL_DISTANCE_ALARM, TYPE_DISTANCE, "distance_alarm", 3, distance_alarm),
    Channel::new(CHANNEL_DISTANCE_MUTATION, TYPE_DISTANCE, "distance_mutation", 5, distance_mutation),
    Channel::new(CHANNEL_DISTANCE_EXCEPTION, TYPE_DISTANCE, "distance_exception", 3, distance_exception),
    Channel::new(CHANNEL_HISTORY, TYPE_HISTORY, "history", HISTORY_RECORD_WIDTH, history),
];

static CHANNEL_INDEX: Lazy<HashMap<(u8, u8), &'static Channel>> = Lazy::new(|| {
    CHANNELS
        .iter()
        .map(|channel| ((channel.id, channel.kind), channel))
        .collect()
});

/// Look up the channel for a tag pair
pub fn lookup(id: u8, kind: u8) -> Option<&'static Channel> {
    CHANNEL_INDEX.get(&(id, kind)).copied()
}

fn device_status(data: &[u8], report: &mut Report) {
    report.device_status = Some(read_u8(data[0]));
}

fn ipso_version(data: &[u8], report: &mut Report) {
    report.ipso_version = Some(read_protocol_version(data[0]));
}

fn serial_number(data: &[u8], report: &mut Report) {
    report.sn = Some(read_serial_number(data));
}

fn hardware_version(data: &[u8], report: &mut Report) {
    report.hardware_version = Some(read_hardware_version(pair(data, 0)));
}

fn firmware_version(data: &[u8], report: &mut Report) {
    report.firmware_version = Some(read_firmware_version(pair(data, 0)));
}

// Unknown class values clear the field
fn lorawan_class(data: &[u8], report: &mut Report) {
    report.lorawan_class = LoRaWanClass::from_byte(data[0]);
}

fn tsl_version(data: &[u8], report: &mut Report) {
    report.tsl_version = Some(read_tsl_version(pair(data, 0)));
}

fn battery(data: &[u8], report: &mut Report) {
    report.battery = Some(read_u8(data[0]));
}

fn temperature(data: &[u8], report: &mut Report) {
    report.temperature = Some(read_i16_le(pair(data, 0)) as f64 / 10.0);
}

fn distance(data: &[u8], report: &mut Report) {
    report.distance = Some(read_u16_le(pair(data, 0)));
}

fn position(data: &[u8], report: &mut Report) {
    report.position = Some(Position::from_byte(data[0]));
}

fn push_event(report: &mut Report, event: DistanceEvent) {
    report.distance = Some(event.distance);
    report.event.push(event);
}

fn distance_alarm(data: &[u8], report: &mut Report) {
    push_event(
        report,
        DistanceEvent {
            distance: read_u16_le(pair(data, 0)),
            kind: EventKind::Alarm {
                distance_alarm: DistanceAlarm::from_byte(data[2]),
            },
        },
    );
}

fn distance_mutation(data: &[u8], report: &mut Report) {
    push_event(
        report,
        DistanceEvent {
            distance: read_u16_le(pair(data, 0)),
            kind: EventKind::Mutation {
                distance_mutation: read_i16_le(pair(data, 2)),
                distance_alarm: DistanceAlarm::from_byte(data[4]),
            },
        },
    );
}

fn distance_exception(data: &[u8], report: &mut Report) {
    push_event(
        report,
        DistanceEvent {
            distance: read_u16_le(pair(data, 0)),
            kind: EventKind::Exception {
                distance_exception: DistanceException::from_byte(data[2]),
            },
        },
    );
}

fn history(data: &[u8], report: &mut Report) {
    report.history.push(HistoryRecord::parse(data));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_pairs_are_unique() {
        assert_eq!(CHANNEL_INDEX.len(), CHANNELS.len());
    }

    #[test]
    fn test_lookup() {
        let history = lookup(0x20, 0xce).unwrap();
        assert_eq!(history.name, "history");
        assert_eq!(history.width, 11);

        assert_eq!(lookup(0xff, 0x16).unwrap().width, 8);
        assert_eq!(lookup(0x94, 0x82).unwrap().width, 5);
        assert!(lookup(0x99, 0x99).is_none());
        // Same channel type, different channel id
        assert!(lookup(0x14, 0x82).is_none());
    }

    #[test]
    fn test_each_channel_in_isolation() {
        let mut report = Report::default();
        (lookup(0xff, 0x09).unwrap().apply)(&[0x01, 0x40], &mut report);
        assert_eq!(report.hardware_version.as_deref(), Some("v1.4"));

        (lookup(0x03, 0x67).unwrap().apply)(&[0x0c, 0xff], &mut report);
        assert_eq!(report.temperature, Some(-24.4));

        (lookup(0x05, 0x00).unwrap().apply)(&[0x01], &mut report);
        assert_eq!(report.position, Some(Position::Tilt));
    }

    #[test]
    fn test_unknown_class_clears_field() {
        let mut report = Report::default();
        lorawan_class(&[2], &mut report);
        assert_eq!(report.lorawan_class, Some(LoRaWanClass::ClassC));
        lorawan_class(&[9], &mut report);
        assert_eq!(report.lorawan_class, None);
    }

    #[test]
    fn test_events_overwrite_distance() {
        let mut report = Report::default();
        distance(&[0x10, 0x00], &mut report);
        distance_exception(&[0x20, 0x00, 0x01], &mut report);
        assert_eq!(report.distance, Some(0x20));
        assert_eq!(report.event.len(), 1);
    }
}
