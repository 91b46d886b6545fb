// Bounded, newest-first retention buffer of plate events.
//
// Purpose
// - Keep a fixed row budget of recent history regardless of burst rate.
//
// Responsibilities
// - Insert at the head and evict exactly the oldest event once capacity is exceeded.
// - Serve full and offset/limit reads in store order.
// - Share events by reference count. Reads and snapshots never copy an event payload.
//
// Boundaries
// - Not synchronized. The in memory ledger owns it behind the same lock as presence.
// - Time based filtering belongs to the views, not to eviction.

use crate::core::plate_event::PlateEvent;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Arc;

pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug, Clone)]
pub struct EventStore {
    events: VecDeque<Arc<PlateEvent>>,
    capacity: usize,
}

impl EventStore {
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn append(&mut self, event: Arc<PlateEvent>) {
        self.events.push_front(event);
        if self.events.len() > self.capacity {
            self.events.pop_back();
        }
    }

    pub fn newest_received_at(&self) -> Option<DateTime<Utc>> {
        self.events.front().map(|e| e.received_at)
    }

    pub fn list(&self) -> Vec<Arc<PlateEvent>> {
        self.events.iter().cloned().collect()
    }

    /// Same content as `list`, frozen for fan-out.
    pub fn snapshot(&self) -> Arc<[Arc<PlateEvent>]> {
        self.events.iter().cloned().collect()
    }

    pub fn slice(&self, offset: usize, limit: usize) -> Vec<Arc<PlateEvent>> {
        if offset >= self.events.len() {
            return Vec::new();
        }
        self.events.iter().skip(offset).take(limit).cloned().collect()
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
