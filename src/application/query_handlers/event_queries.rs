// Read side port over retained history and camera presence.
//
// Purpose
// - Let the presentation adapters ask for views without knowing how state is held or locked.
//
// Responsibilities
// - Every method answers from one consistent snapshot of the underlying state.
// - Out of range requests yield empty results, never errors.

use crate::core::plate_event::PlateEvent;
use crate::core::presence::CameraStatus;
use crate::core::views::Page;
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

#[async_trait]
pub trait EventQueries: Send + Sync {
    /// Full retained history, newest first.
    async fn list_events(&self) -> Vec<Arc<PlateEvent>>;

    async fn slice_events(&self, offset: usize, limit: usize) -> Vec<Arc<PlateEvent>>;

    async fn recent_events(&self, now: DateTime<Utc>, window: TimeDelta) -> Vec<Arc<PlateEvent>>;

    async fn latest_per_camera(&self) -> BTreeMap<String, Arc<PlateEvent>>;

    async fn page_events(&self, page_number: usize, page_size: usize) -> Page;

    /// Sorted by camera id.
    async fn camera_statuses(&self, now: DateTime<Utc>) -> Vec<CameraStatus>;
}
