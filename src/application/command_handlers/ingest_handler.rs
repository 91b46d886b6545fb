// Ingestion command handler orchestrates the write flow.
//
// Responsibilities
// - Normalize the submission. A rejected submission touches nothing.
// - Assign the id and record the event in the ledger (store append and presence touch under one lock).
// - Publish the update after the lock is released, so viewers never stall ingestion.

use crate::application::errors::ApplicationError;
use crate::core::plate_event::PlateEvent;
use crate::core::plate_event::submission::{PlateEventSubmission, normalize};
use crate::core::ports::{Clock, EventBroadcaster, EventLedger, IdGenerator};
use std::sync::Arc;

pub struct IngestHandler {
    ledger: Arc<dyn EventLedger>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    broadcaster: Arc<dyn EventBroadcaster>,
}

impl IngestHandler {
    pub fn new(
        ledger: Arc<dyn EventLedger>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        broadcaster: Arc<dyn EventBroadcaster>,
    ) -> Self {
        Self {
            ledger,
            ids,
            clock,
            broadcaster,
        }
    }

    pub async fn handle(&self, submission: PlateEventSubmission) -> Result<Arc<PlateEvent>, ApplicationError> {
        let draft = match normalize(submission) {
            Ok(draft) => draft,
            Err(err) => {
                tracing::warn!(missing = ?err.missing, "Rejected plate event");
                return Err(err.into());
            }
        };

        tracing::info!(
            camera_id = %draft.camera_id(),
            has_plate_image = draft.has_plate_image(),
            has_vehicle_image = draft.has_vehicle_image(),
            "Received plate event"
        );

        let update = self
            .ledger
            .record(draft, self.ids.next_id(), self.clock.now())
            .await;
        let event = update.event.clone();
        self.broadcaster.publish(update).await;
        Ok(event)
    }
}
