use crate::adapters::broadcast::noop_broadcaster::NoopBroadcaster;
use crate::adapters::broadcast::realtime_hub::RealtimeHub;
use crate::adapters::clock::SystemClock;
use crate::adapters::ids::{SequentialIdGenerator, UuidIdGenerator};
use crate::adapters::in_memory::in_memory_event_ledger::InMemoryEventLedger;
use crate::application::command_handlers::ingest_handler::IngestHandler;
use crate::application::query_handlers::event_queries::EventQueries;
use crate::core::ports::{Clock, EventBroadcaster, IdGenerator};
use crate::shell::config::{AppConfig, IdStrategy};
use chrono::TimeDelta;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub ingest_handler: Arc<IngestHandler>,
    pub queries: Arc<dyn EventQueries>,
    pub clock: Arc<dyn Clock>,
    /// Present only when live updates are enabled.
    pub hub: Option<Arc<RealtimeHub>>,
    pub active_window: TimeDelta,
    pub events_limit: usize,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Self {
        let ledger = Arc::new(InMemoryEventLedger::new(
            config.events_limit,
            config.camera_online_window,
        ));

        let ids: Arc<dyn IdGenerator> = match config.id_strategy {
            IdStrategy::Uuid => Arc::new(UuidIdGenerator),
            IdStrategy::Sequential => Arc::new(SequentialIdGenerator::new()),
        };

        let hub = config
            .live_updates
            .then(|| Arc::new(RealtimeHub::new(config.subscriber_buffer)));
        let broadcaster: Arc<dyn EventBroadcaster> = match &hub {
            Some(hub) => hub.clone(),
            None => Arc::new(NoopBroadcaster),
        };

        let ingest_handler = Arc::new(IngestHandler::new(
            ledger.clone(),
            ids,
            clock.clone(),
            broadcaster,
        ));

        Self {
            ingest_handler,
            queries: ledger,
            clock,
            hub,
            active_window: config.active_window,
            events_limit: config.events_limit,
        }
    }
}
