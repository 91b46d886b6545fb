#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use lpr_intake::adapters::broadcast::noop_broadcaster::NoopBroadcaster;
use lpr_intake::adapters::clock::FixedClock;
use lpr_intake::adapters::ids::SequentialIdGenerator;
use lpr_intake::adapters::in_memory::in_memory_event_ledger::InMemoryEventLedger;
use lpr_intake::application::command_handlers::ingest_handler::IngestHandler;
use lpr_intake::core::plate_event::submission::PlateEventSubmission;
use lpr_intake::core::ports::EventBroadcaster;
use std::sync::Arc;

pub fn t0() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
}

pub fn submission(camera_id: &str, code: &str) -> PlateEventSubmission {
    PlateEventSubmission {
        camera_id: Some(camera_id.to_string()),
        code: Some(code.to_string()),
        event_time: Some("2024-05-01T10:00:00Z".to_string()),
        ..PlateEventSubmission::default()
    }
}

pub struct Harness {
    pub ledger: Arc<InMemoryEventLedger>,
    pub clock: Arc<FixedClock>,
    pub handler: IngestHandler,
}

pub fn harness(capacity: usize, broadcaster: Arc<dyn EventBroadcaster>) -> Harness {
    let ledger = Arc::new(InMemoryEventLedger::new(capacity, chrono::TimeDelta::minutes(10)));
    let clock = Arc::new(FixedClock::new(t0()));
    let handler = IngestHandler::new(
        ledger.clone(),
        Arc::new(SequentialIdGenerator::new()),
        clock.clone(),
        broadcaster,
    );
    Harness {
        ledger,
        clock,
        handler,
    }
}

pub fn quiet_harness(capacity: usize) -> Harness {
    harness(capacity, Arc::new(NoopBroadcaster))
}
