// Plate detection event as retained by the service.
//
// Purpose
// - Represent one accepted detection after normalization, with its server assigned id and receive instant.
//
// Responsibilities
// - Keep the wire names cameras and dashboards already use (CameraId, Code, EventDateTime, ...).
// - Render absent optional fields as explicit null, never as a sentinel value.
//
// Invariants
// - Immutable after construction. Stores and views share it behind an Arc, they never patch a stored event.

pub mod submission;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Confidence reported by the camera. Some firmwares send a score, others a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeConfidence {
    Score(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateEvent {
    pub id: String,
    #[serde(rename = "CameraId")]
    pub camera_id: String,
    #[serde(rename = "Code")]
    pub code: String,
    /// Sender supplied detection time, stored as given.
    #[serde(rename = "EventDateTime")]
    pub event_time: String,
    #[serde(rename = "CodeConfidence")]
    pub confidence: Option<CodeConfidence>,
    #[serde(rename = "PlateImageBase64")]
    pub plate_image: Option<String>,
    #[serde(rename = "ImageBase64")]
    pub vehicle_image: Option<String>,
    #[serde(rename = "VehicleMake")]
    pub vehicle_make: Option<String>,
    #[serde(rename = "CarColor")]
    pub vehicle_color: Option<String>,
    #[serde(rename = "receivedAt", with = "iso_millis")]
    pub received_at: DateTime<Utc>,
}

/// ISO 8601 with millisecond precision and a `Z` suffix, e.g. `2024-05-01T10:00:00.000Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|at| at.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

pub fn format_instant(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod plate_event_tests {
    use super::*;
    use crate::test_support::fixtures::events::make_plate_event;
    use rstest::rstest;

    #[rstest]
    fn it_should_serialize_with_the_camera_wire_names() {
        let event = make_plate_event("evt-1", "cam-1", "ABC123", 1_700_000_000_000);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["id"], "evt-1");
        assert_eq!(json["CameraId"], "cam-1");
        assert_eq!(json["Code"], "ABC123");
        assert_eq!(json["receivedAt"], "2023-11-14T22:13:20.000Z");
    }

    #[rstest]
    fn it_should_render_absent_optionals_as_null() {
        let event = make_plate_event("evt-1", "cam-1", "ABC123", 1_700_000_000_000);
        let json = serde_json::to_value(&event).unwrap();
        for key in ["CodeConfidence", "PlateImageBase64", "ImageBase64", "VehicleMake", "CarColor"] {
            assert!(json.get(key).is_some(), "{key} should be present");
            assert!(json[key].is_null(), "{key} should be null");
        }
    }

    #[rstest]
    #[case(serde_json::json!(0.93), CodeConfidence::Score(0.93))]
    #[case(serde_json::json!("high"), CodeConfidence::Label("high".into()))]
    fn it_should_accept_numeric_and_textual_confidence(
        #[case] raw: serde_json::Value,
        #[case] expected: CodeConfidence,
    ) {
        let confidence: CodeConfidence = serde_json::from_value(raw).unwrap();
        assert_eq!(confidence, expected);
    }

    #[rstest]
    fn it_should_read_back_the_received_instant() {
        let event = make_plate_event("evt-1", "cam-1", "ABC123", 1_700_000_000_123);
        let json = serde_json::to_string(&event).unwrap();
        let back: PlateEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.received_at, event.received_at);
    }
}
