// Raw camera submission and its normalization into a plate event draft.
//
// Purpose
// - Validate the required fields before anything touches shared state.
//
// Responsibilities
// - Report every missing required field, in wire order, so senders can fix all of them at once.
// - Carry optional fields through unchanged. Absent stays absent.
// - Never perform input or output. Id and receive instant are assigned by the caller.

use crate::core::plate_event::{CodeConfidence, PlateEvent};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlateEventSubmission {
    #[serde(rename = "CameraId")]
    pub camera_id: Option<String>,
    #[serde(rename = "Code")]
    pub code: Option<String>,
    #[serde(rename = "EventDateTime")]
    pub event_time: Option<String>,
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
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// A validated submission waiting for its id and receive instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateEventDraft {
    camera_id: String,
    code: String,
    event_time: String,
    confidence: Option<CodeConfidence>,
    plate_image: Option<String>,
    vehicle_image: Option<String>,
    vehicle_make: Option<String>,
    vehicle_color: Option<String>,
}

impl PlateEventDraft {
    pub fn camera_id(&self) -> &str {
        &self.camera_id
    }

    pub fn has_plate_image(&self) -> bool {
        self.plate_image.is_some()
    }

    pub fn has_vehicle_image(&self) -> bool {
        self.vehicle_image.is_some()
    }

    pub fn into_event(self, id: String, received_at: DateTime<Utc>) -> PlateEvent {
        PlateEvent {
            id,
            camera_id: self.camera_id,
            code: self.code,
            event_time: self.event_time,
            confidence: self.confidence,
            plate_image: self.plate_image,
            vehicle_image: self.vehicle_image,
            vehicle_make: self.vehicle_make,
            vehicle_color: self.vehicle_color,
            received_at,
        }
    }
}

fn required(value: Option<String>, field: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => {
            missing.push(field);
            String::new()
        }
    }
}

pub fn normalize(submission: PlateEventSubmission) -> Result<PlateEventDraft, ValidationError> {
    let mut missing = Vec::new();
    let camera_id = required(submission.camera_id, "CameraId", &mut missing);
    let code = required(submission.code, "Code", &mut missing);
    let event_time = required(submission.event_time, "EventDateTime", &mut missing);
    if !missing.is_empty() {
        return Err(ValidationError { missing });
    }

    Ok(PlateEventDraft {
        camera_id,
        code,
        event_time,
        confidence: submission.confidence,
        plate_image: submission.plate_image,
        vehicle_image: submission.vehicle_image,
        vehicle_make: submission.vehicle_make,
        vehicle_color: submission.vehicle_color,
    })
}
