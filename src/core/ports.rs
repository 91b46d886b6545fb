// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe capabilities as traits: the event ledger, identifier generation, wall clock and live fan-out.
//
// Responsibilities
// - Keep the ingestion flow independent of uuid availability, real time and whether viewers exist.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.

use crate::core::plate_event::PlateEvent;
use crate::core::plate_event::submission::PlateEventDraft;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub trait IdGenerator: Send + Sync {
    /// Never returns the same id twice within one process.
    fn next_id(&self) -> String;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Result of one accepted append, captured inside the ledger's critical section.
#[derive(Debug, Clone)]
pub struct LedgerUpdate {
    /// Strictly increasing per ledger; orders snapshots that reach a broadcaster out of order.
    pub sequence: u64,
    pub event: Arc<PlateEvent>,
    /// Retained history right after the append, newest first. Shares the stored events.
    pub snapshot: Arc<[Arc<PlateEvent>]>,
}

#[async_trait]
pub trait EventLedger: Send + Sync {
    /// Stamps the receive instant, appends the event and touches its camera in one critical section.
    async fn record(&self, draft: PlateEventDraft, id: String, now: DateTime<Utc>) -> LedgerUpdate;
}

#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    /// Best effort. Must return without waiting on any consumer.
    async fn publish(&self, update: LedgerUpdate);
}
