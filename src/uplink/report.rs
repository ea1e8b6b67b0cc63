//! Decoded uplink report and the enumerations it carries
//!
//! The report serializes to the flat JSON object network servers expect:
//! scalar fields appear only once their channel has been seen, and the
//! `event` / `history` lists are omitted while empty.

use serde::Serialize;

use crate::uplink::history::HistoryRecord;

/// Everything decoded from one uplink payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_status: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ipso_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firmware_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lorawan_class: Option<LoRaWanClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsl_version: Option<String>,
    /// Battery level in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery: Option<u8>,
    /// Temperature in °C
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Distance in mm; alarm events overwrite it with their own reading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub event: Vec<DistanceEvent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryRecord>,
}

impl Report {
    /// True when no channel contributed anything
    pub fn is_empty(&self) -> bool {
        *self == Report::default()
    }

    /// Render the report as a JSON value
    pub fn to_json(&self) -> serde_json::Value {
        // Serializing plain strings, numbers and lists cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LoRaWanClass {
    ClassA,
    ClassB,
    ClassC,
    ClassCtoB,
}

impl LoRaWanClass {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::ClassA),
            1 => Some(Self::ClassB),
            2 => Some(Self::ClassC),
            3 => Some(Self::ClassCtoB),
            _ => None,
        }
    }
}

/// Mounting position reported by the tilt sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Position {
    Normal,
    Tilt,
    Unknown,
}

impl Position {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Normal,
            1 => Self::Tilt,
            _ => Self::Unknown,
        }
    }
}

/// Threshold / mutation alarm state carried by distance alarm events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistanceAlarm {
    #[serde(rename = "Threshold Alarm Release")]
    ThresholdAlarmRelease,
    #[serde(rename = "Threshold Alarm")]
    ThresholdAlarm,
    #[serde(rename = "Mutation Alarm")]
    MutationAlarm,
    Unknown,
}

impl DistanceAlarm {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::ThresholdAlarmRelease,
            1 => Self::ThresholdAlarm,
            2 => Self::MutationAlarm,
            _ => Self::Unknown,
        }
    }
}

/// Blind spot and radar exception state carried by exception events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DistanceException {
    #[serde(rename = "Blind Spot Alarm Release")]
    BlindSpotAlarmRelease,
    #[serde(rename = "Blind Spot Alarm")]
    BlindSpotAlarm,
    #[serde(rename = "No Target")]
    NoTarget,
    #[serde(rename = "Sensor Exception")]
    SensorException,
    Unknown,
}

impl DistanceException {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::BlindSpotAlarmRelease,
            1 => Self::BlindSpotAlarm,
            2 => Self::NoTarget,
            3 => Self::SensorException,
            _ => Self::Unknown,
        }
    }
}

/// One entry of the report's `event` list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceEvent {
    pub distance: u16,
    #[serde(flatten)]
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventKind {
    /// Channel 0x84: threshold alarm raised or released
    Alarm { distance_alarm: DistanceAlarm },
    /// Channel 0x94: abrupt change, with the signed delta
    Mutation {
        distance_mutation: i16,
        distance_alarm: DistanceAlarm,
    },
    /// Channel 0xb4: blind spot or radar exception
    Exception { distance_exception: DistanceException },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_report_serializes_to_empty_object() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(report.to_json(), json!({}));
    }

    #[test]
    fn test_enum_names() {
        assert_eq!(LoRaWanClass::from_byte(3), Some(LoRaWanClass::ClassCtoB));
        assert_eq!(LoRaWanClass::from_byte(4), None);
        assert_eq!(Position::from_byte(7), Position::Unknown);
        assert_eq!(
            serde_json::to_value(DistanceAlarm::from_byte(0)).unwrap(),
            json!("Threshold Alarm Release")
        );
        assert_eq!(
            serde_json::to_value(DistanceException::from_byte(2)).unwrap(),
            json!("No Target")
        );
        assert_eq!(
            serde_json::to_value(LoRaWanClass::ClassCtoB).unwrap(),
            json!("ClassCtoB")
        );
    }

    #[test]
    fn test_event_variants_flatten() {
        let mutation = DistanceEvent {
            distance: 1200,
            kind: EventKind::Mutation {
                distance_mutation: -35,
                distance_alarm: DistanceAlarm::MutationAlarm,
            },
        };
        assert_eq!(
            serde_json::to_value(mutation).unwrap(),
            json!({
                "distance": 1200,
                "distance_mutation": -35,
                "distance_alarm": "Mutation Alarm"
            })
        );

        let exception = DistanceEvent {
            distance: 0,
            kind: EventKind::Exception {
                distance_exception: DistanceException::BlindSpotAlarm,
            },
        };
        assert_eq!(
            serde_json::to_value(exception).unwrap(),
            json!({ "distance": 0, "distance_exception": "Blind Spot Alarm" })
        );
    }
}
