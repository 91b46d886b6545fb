// Camera presence: last activity per camera and the derived online flag.
//
// Purpose
// - Answer "is this camera online" from the instant of its most recent accepted event.
//
// Responsibilities
// - Create an entry on the first event of a camera and overwrite it on every later one.
// - Derive online status lazily at read time. Entries are never removed; a silent camera only goes offline.
//
// Boundaries
// - Does not defend against out of order instants. The caller applies touches in order.

use crate::core::plate_event::iso_millis;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_LIVENESS_WINDOW: TimeDelta = TimeDelta::minutes(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraStatus {
    #[serde(rename = "CameraId")]
    pub camera_id: String,
    #[serde(rename = "lastSeen", with = "iso_millis")]
    pub last_seen: DateTime<Utc>,
    #[serde(rename = "isOnline")]
    pub is_online: bool,
}

#[derive(Debug, Clone)]
pub struct PresenceTracker {
    last_seen: HashMap<String, DateTime<Utc>>,
    liveness_window: TimeDelta,
}

impl PresenceTracker {
    pub fn new(liveness_window: TimeDelta) -> Self {
        Self {
            last_seen: HashMap::new(),
            liveness_window,
        }
    }

    pub fn liveness_window(&self) -> TimeDelta {
        self.liveness_window
    }

    pub fn touch(&mut self, camera_id: &str, at: DateTime<Utc>) {
        match self.last_seen.get_mut(camera_id) {
            Some(seen) => *seen = at,
            None => {
                self.last_seen.insert(camera_id.to_string(), at);
            }
        }
    }

    pub fn last_seen(&self, camera_id: &str) -> Option<DateTime<Utc>> {
        self.last_seen.get(camera_id).copied()
    }

    /// Unknown cameras are reported offline.
    pub fn is_online(&self, camera_id: &str, now: DateTime<Utc>) -> bool {
        self.last_seen
            .get(camera_id)
            .is_some_and(|seen| self.within_window(*seen, now))
    }

    /// One entry per camera ever seen, in no particular order.
    pub fn status(&self, now: DateTime<Utc>) -> Vec<CameraStatus> {
        self.last_seen
            .iter()
            .map(|(camera_id, seen)| CameraStatus {
                camera_id: camera_id.clone(),
                last_seen: *seen,
                is_online: self.within_window(*seen, now),
            })
            .collect()
    }

    pub fn camera_count(&self) -> usize {
        self.last_seen.len()
    }

    // exclusive at the threshold
    fn within_window(&self, seen: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(seen) < self.liveness_window
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(DEFAULT_LIVENESS_WINDOW)
    }
}
