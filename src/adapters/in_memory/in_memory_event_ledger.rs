// In memory owner of the event store and the presence tracker.
//
// Purpose
// - Hold all shared mutable state of the service behind one synchronization boundary.
//
// Responsibilities
// - Serialize appends and presence touches under a single write lock.
// - Stamp receive instants so they never go backwards, even if the wall clock does.
// - Hand out consistent snapshots for the read views; readers see pre or post append state, never a torn one.
// - Snapshots are reference counted copies of the event list, so the lock is held for pointer copies only.

use crate::application::query_handlers::event_queries::EventQueries;
use crate::core::event_store::EventStore;
use crate::core::plate_event::PlateEvent;
use crate::core::plate_event::submission::PlateEventDraft;
use crate::core::ports::{EventLedger, LedgerUpdate};
use crate::core::presence::{CameraStatus, PresenceTracker};
use crate::core::views::{self, Page};
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

struct LedgerState {
    store: EventStore,
    presence: PresenceTracker,
    sequence: u64,
}

pub struct InMemoryEventLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryEventLedger {
    pub fn new(capacity: usize, liveness_window: TimeDelta) -> Self {
        Self {
            inner: RwLock::new(LedgerState {
                store: EventStore::with_capacity(capacity),
                presence: PresenceTracker::new(liveness_window),
                sequence: 0,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.store.is_empty()
    }

    pub async fn is_online(&self, camera_id: &str, now: DateTime<Utc>) -> bool {
        self.inner.read().await.presence.is_online(camera_id, now)
    }

    async fn snapshot(&self) -> Vec<Arc<PlateEvent>> {
        self.inner.read().await.store.list()
    }
}

#[async_trait::async_trait]
impl EventLedger for InMemoryEventLedger {
    async fn record(&self, draft: PlateEventDraft, id: String, now: DateTime<Utc>) -> LedgerUpdate {
        let mut guard = self.inner.write().await;
        let received_at = guard
            .store
            .newest_received_at()
            .map_or(now, |newest| newest.max(now));
        let event = Arc::new(draft.into_event(id, received_at));

        guard.presence.touch(&event.camera_id, received_at);
        guard.store.append(event.clone());
        guard.sequence += 1;

        LedgerUpdate {
            sequence: guard.sequence,
            event,
            snapshot: guard.store.snapshot(),
        }
    }
}

#[async_trait::async_trait]
impl EventQueries for InMemoryEventLedger {
    async fn list_events(&self) -> Vec<Arc<PlateEvent>> {
        self.snapshot().await
    }

    async fn slice_events(&self, offset: usize, limit: usize) -> Vec<Arc<PlateEvent>> {
        self.inner.read().await.store.slice(offset, limit)
    }

    async fn recent_events(&self, now: DateTime<Utc>, window: TimeDelta) -> Vec<Arc<PlateEvent>> {
        views::recent_window(&self.snapshot().await, now, window)
    }

    async fn latest_per_camera(&self) -> BTreeMap<String, Arc<PlateEvent>> {
        views::latest_per_camera(&self.snapshot().await)
    }

    async fn page_events(&self, page_number: usize, page_size: usize) -> Page {
        views::page(&self.snapshot().await, page_number, page_size)
    }

    async fn camera_statuses(&self, now: DateTime<Utc>) -> Vec<CameraStatus> {
        views::camera_status_list(&self.inner.read().await.presence, now)
    }
}

impl Default for InMemoryEventLedger {
    fn default() -> Self {
        Self::new(
            crate::core::event_store::DEFAULT_CAPACITY,
            crate::core::presence::DEFAULT_LIVENESS_WINDOW,
        )
    }
}
