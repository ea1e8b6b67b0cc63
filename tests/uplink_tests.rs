use em410_rdl::uplink::{decode, decode_partial, DecodeError, HistoryEvent, Sample};
use em410_rdl::{DistanceAlarm, LoRaWanClass, Position};
use serde_json::json;

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

/// Join-time attribute report
const ATTRIBUTES_HEX: &str = "ff0101ff166736d39276040007ff090140ff0a0102ff0f00ffff0100ff0b01";

/// Periodic report: battery, temperature, distance, position
const PERIODIC_HEX: &str = "01755c03670f010482e803050000";

/// Threshold alarm, mutation alarm and blind spot exception
const EVENTS_HEX: &str = "8482d0070194822c01f40102b482fdff02";

/// Two history samples, the second with both readings in exception state
const HISTORY_HEX: &str = "20ce0066ee5fe8030f012c011120ce8066ee5ffdffffff000000";

#[test]
fn test_attributes() {
    let report = decode(&hex_to_bytes(ATTRIBUTES_HEX)).unwrap();
    assert_eq!(report.lorawan_class, Some(LoRaWanClass::ClassA));
    assert_eq!(
        report.to_json(),
        json!({
            "device_status": 1,
            "ipso_version": "v0.1",
            "sn": "6736d39276040007",
            "hardware_version": "v1.4",
            "firmware_version": "v1.2",
            "lorawan_class": "ClassA",
            "tsl_version": "v1.0",
        })
    );
}

#[test]
fn test_periodic_report() {
    let report = decode(&hex_to_bytes(PERIODIC_HEX)).unwrap();
    assert_eq!(report.position, Some(Position::Normal));
    assert_eq!(
        report.to_json(),
        json!({ "battery": 92, "temperature": 27.1, "distance": 1000, "position": "Normal" })
    );
}

#[test]
fn test_negative_temperature() {
    let report = decode(&[0x03, 0x67, 0xf6, 0xff]).unwrap();
    assert_eq!(report.temperature, Some(-1.0));
}

#[test]
fn test_distance_events() {
    let report = decode(&hex_to_bytes(EVENTS_HEX)).unwrap();
    assert_eq!(report.event.len(), 3);
    // The last event's reading wins
    assert_eq!(report.distance, Some(0xfffd));
    assert_eq!(
        report.to_json(),
        json!({
            "distance": 65533,
            "event": [
                { "distance": 2000, "distance_alarm": "Threshold Alarm" },
                { "distance": 300, "distance_mutation": 500, "distance_alarm": "Mutation Alarm" },
                { "distance": 65533, "distance_exception": "No Target" },
            ],
        })
    );
}

#[test]
fn test_unknown_alarm_type() {
    let report = decode(&[0x84, 0x82, 0x10, 0x00, 0x07]).unwrap();
    assert_eq!(
        report.to_json()["event"][0]["distance_alarm"],
        json!("Unknown")
    );
}

#[test]
fn test_negative_mutation() {
    let report = decode(&[0x94, 0x82, 0x64, 0x00, 0x38, 0xff, 0x02]).unwrap();
    assert_eq!(report.to_json()["event"][0]["distance_mutation"], json!(-200));
}

#[test]
fn test_history_records() {
    let report = decode(&hex_to_bytes(HISTORY_HEX)).unwrap();
    assert_eq!(report.history.len(), 2);

    let first = &report.history[0];
    assert_eq!(
        first.event,
        HistoryEvent::THRESHOLD_ALARM | HistoryEvent::MUTATION_ALARM
    );
    assert_eq!(first.distance, Sample::Value(1000));

    let second = &report.history[1];
    assert_eq!(second.distance, Sample::NoTarget);
    assert_eq!(second.temperature, Sample::SensorException);

    assert_eq!(
        report.to_json(),
        json!({
            "history": [
                {
                    "timestamp": 1609459200,
                    "distance": 1000,
                    "temperature": 27.1,
                    "event": ["Threshold Alarm", "Mutation Alarm"],
                    "distance_mutation": 300,
                },
                {
                    "timestamp": 1609459328,
                    "distance_exception": "No Target",
                    "temperature_exception": "Sensor Exception",
                },
            ],
        })
    );
}

#[test]
fn test_history_does_not_touch_live_fields() {
    let report = decode(&hex_to_bytes(HISTORY_HEX)).unwrap();
    assert_eq!(report.distance, None);
    assert_eq!(report.temperature, None);
    assert!(report.event.is_empty());
}

#[test]
fn test_combined_report() {
    let hex = format!("{ATTRIBUTES_HEX}{PERIODIC_HEX}{EVENTS_HEX}");
    let report = decode(&hex_to_bytes(&hex)).unwrap();
    assert_eq!(report.device_status, Some(1));
    assert_eq!(report.battery, Some(92));
    assert_eq!(report.event.len(), 3);
    assert_eq!(
        report.event[0].kind,
        em410_rdl::EventKind::Alarm {
            distance_alarm: DistanceAlarm::ThresholdAlarm
        }
    );
}

#[test]
fn test_repeated_channel_overwrites() {
    let report = decode(&[0x01, 0x75, 0x10, 0x01, 0x75, 0x20]).unwrap();
    assert_eq!(report.battery, Some(0x20));
}

#[test]
fn test_unknown_tag_stops_decoding() {
    let report = decode(&hex_to_bytes("0175649999ff0b01")).unwrap();
    assert_eq!(report.to_json(), json!({ "battery": 100 }));
}

#[test]
fn test_truncated_history() {
    let bytes = hex_to_bytes("01756420ce0066ee5fe803");
    let err = decode(&bytes).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Truncated {
            name: "history",
            channel_id: 0x20,
            channel_type: 0xce,
            offset: 3,
            expected: 11,
            actual: 6,
        }
    );

    let (partial, err) = decode_partial(&bytes);
    assert_eq!(partial.to_json(), json!({ "battery": 100 }));
    assert!(err.is_some());
}
