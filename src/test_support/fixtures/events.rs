use crate::core::plate_event::PlateEvent;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

pub const FIXTURE_EPOCH_MS: i64 = 1_700_000_000_000;

pub fn make_plate_event(id: &str, camera_id: &str, code: &str, received_at_ms: i64) -> PlateEvent {
    PlateEvent {
        id: id.to_string(),
        camera_id: camera_id.to_string(),
        code: code.to_string(),
        event_time: "2023-11-14T22:13:20Z".to_string(),
        confidence: None,
        plate_image: None,
        vehicle_image: None,
        vehicle_make: None,
        vehicle_color: None,
        received_at: Utc.timestamp_millis_opt(received_at_ms).unwrap(),
    }
}

/// `evt-1` .. `evt-<count>` in insertion order (oldest first), one second apart, over three cameras.
pub fn make_numbered_events(count: usize) -> Vec<Arc<PlateEvent>> {
    (1..=count)
        .map(|n| {
            Arc::new(make_plate_event(
                &format!("evt-{n}"),
                &format!("cam-{}", n % 3),
                &format!("PLT{n:03}"),
                FIXTURE_EPOCH_MS + n as i64 * 1_000,
            ))
        })
        .collect()
}
