// Read side projections over the retained history and presence.
//
// Purpose
// - Serve "last N", "last T", "latest per camera" and paged views from one canonical store.
//
// Responsibilities
// - Stay pure. Every function takes the snapshot it works on and keeps no state of its own.
// - Normalize out of range requests into empty results instead of errors.

use crate::core::plate_event::PlateEvent;
use crate::core::presence::{CameraStatus, PresenceTracker};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

pub const DEFAULT_ACTIVE_WINDOW: TimeDelta = TimeDelta::seconds(30);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<Arc<PlateEvent>>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Events received less than `window` before `now`. Events stamped after `now` are kept.
pub fn recent_window(
    events: &[Arc<PlateEvent>],
    now: DateTime<Utc>,
    window: TimeDelta,
) -> Vec<Arc<PlateEvent>> {
    events
        .iter()
        .filter(|e| now.signed_duration_since(e.received_at) < window)
        .cloned()
        .collect()
}

/// Expects newest-first input; the first occurrence of a camera wins.
pub fn latest_per_camera(events: &[Arc<PlateEvent>]) -> BTreeMap<String, Arc<PlateEvent>> {
    let mut latest = BTreeMap::new();
    for event in events {
        latest
            .entry(event.camera_id.clone())
            .or_insert_with(|| event.clone());
    }
    latest
}

/// 1-indexed. Page zero and pages past the end are empty; a zero page size is treated as one.
pub fn page(events: &[Arc<PlateEvent>], page_number: usize, page_size: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = events.len().div_ceil(page_size).max(1);
    let items = match page_number.checked_sub(1) {
        Some(index) => events
            .iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    Page {
        items,
        page: page_number,
        page_size,
        total_pages,
    }
}

/// Presence status sorted by camera id.
pub fn camera_status_list(tracker: &PresenceTracker, now: DateTime<Utc>) -> Vec<CameraStatus> {
    let mut status = tracker.status(now);
    status.sort_by(|a, b| a.camera_id.cmp(&b.camera_id));
    status
}
