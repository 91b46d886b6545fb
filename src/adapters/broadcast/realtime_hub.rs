//! RealtimeHub - live fan-out of accepted plate events
//!
//! ## Responsibilities
//!
//! - Subscriber registration with an immediate catch-up snapshot
//! - Best effort delivery of `lprEvent` and `eventsUpdate` to every subscriber
//! - Isolation: each subscriber has its own bounded queue; a full queue drops
//!   messages for that subscriber only, a closed one is removed

use crate::core::plate_event::PlateEvent;
use crate::core::ports::{EventBroadcaster, LedgerUpdate};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use uuid::Uuid;

pub const DEFAULT_SUBSCRIBER_BUFFER: usize = 64;

/// Hub message types
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "camelCase")]
pub enum HubMessage {
    /// One newly accepted event
    LprEvent(Arc<PlateEvent>),
    /// Full retained history, newest first. Also the catch-up message.
    EventsUpdate(Arc<[Arc<PlateEvent>]>),
}

impl HubMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            HubMessage::LprEvent(_) => "lprEvent",
            HubMessage::EventsUpdate(_) => "eventsUpdate",
        }
    }
}

/// Handle of one live consumer. Dropping it disconnects the consumer on the next publish.
#[derive(Debug)]
pub struct Subscription {
    id: Uuid,
    receiver: mpsc::Receiver<HubMessage>,
}

impl Subscription {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn recv(&mut self) -> Option<HubMessage> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<HubMessage> {
        self.receiver.try_recv().ok()
    }
}

struct HubState {
    subscribers: HashMap<Uuid, mpsc::Sender<HubMessage>>,
    latest_sequence: u64,
    latest_snapshot: Arc<[Arc<PlateEvent>]>,
}

pub struct RealtimeHub {
    state: RwLock<HubState>,
    buffer: usize,
}

impl RealtimeHub {
    /// `buffer` is the per subscriber queue capacity, raised to at least one.
    pub fn new(buffer: usize) -> Self {
        Self {
            state: RwLock::new(HubState {
                subscribers: HashMap::new(),
                latest_sequence: 0,
                latest_snapshot: Arc::from(Vec::new()),
            }),
            buffer: buffer.max(1),
        }
    }

    pub async fn subscribe(&self) -> Subscription {
        let id = Uuid::now_v7();
        let (tx, receiver) = mpsc::channel(self.buffer);

        let mut state = self.state.write().await;
        // fresh channel with capacity >= 1, cannot be full
        let _ = tx.try_send(HubMessage::EventsUpdate(state.latest_snapshot.clone()));
        state.subscribers.insert(id, tx);
        tracing::info!(subscriber_id = %id, subscribers = state.subscribers.len(), "Viewer subscribed");

        Subscription { id, receiver }
    }

    /// Returns whether a subscriber was removed. Repeated calls are no-ops.
    pub async fn unsubscribe(&self, id: &Uuid) -> bool {
        let mut state = self.state.write().await;
        let removed = state.subscribers.remove(id).is_some();
        if removed {
            tracing::info!(subscriber_id = %id, subscribers = state.subscribers.len(), "Viewer unsubscribed");
        }
        removed
    }

    pub async fn subscriber_count(&self) -> usize {
        self.state.read().await.subscribers.len()
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_BUFFER)
    }
}

#[async_trait::async_trait]
impl EventBroadcaster for RealtimeHub {
    async fn publish(&self, update: LedgerUpdate) {
        let mut state = self.state.write().await;
        if update.sequence > state.latest_sequence {
            state.latest_sequence = update.sequence;
            state.latest_snapshot = update.snapshot;
        }
        if state.subscribers.is_empty() {
            return;
        }

        // a late publish still pushes the newest snapshot the hub has seen
        let messages = [
            HubMessage::LprEvent(update.event),
            HubMessage::EventsUpdate(state.latest_snapshot.clone()),
        ];
        tracing::debug!(subscribers = state.subscribers.len(), sequence = update.sequence, "Broadcasting plate event");

        state.subscribers.retain(|id, tx| {
            for message in &messages {
                match tx.try_send(message.clone()) {
                    Ok(()) => {}
                    Err(TrySendError::Full(dropped)) => {
                        tracing::warn!(subscriber_id = %id, message_type = dropped.kind(), "Viewer queue full, dropping message");
                    }
                    Err(TrySendError::Closed(_)) => {
                        tracing::info!(subscriber_id = %id, "Viewer gone, removing subscriber");
                        return false;
                    }
                }
            }
            true
        });
    }
}

#[cfg(test)]
mod realtime_hub_tests {
    use super::*;
    use crate::test_support::fixtures::events::make_numbered_events;
    use rstest::rstest;

    fn update(sequence: u64, history: &[Arc<PlateEvent>]) -> LedgerUpdate {
        LedgerUpdate {
            sequence,
            event: history[0].clone(),
            snapshot: history.iter().cloned().collect(),
        }
    }

    fn newest_first(count: usize) -> Vec<Arc<PlateEvent>> {
        let mut events = make_numbered_events(count);
        events.reverse();
        events
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_send_the_catch_up_snapshot_first() {
        let hub = RealtimeHub::new(4);
        hub.publish(update(1, &newest_first(1))).await;

        let mut subscription = hub.subscribe().await;
        match subscription.recv().await {
            Some(HubMessage::EventsUpdate(snapshot)) => assert_eq!(snapshot.len(), 1),
            other => panic!("expected catch-up, got {other:?}"),
        }
        assert!(subscription.try_recv().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_regress_the_catch_up_on_late_publishes() {
        let hub = RealtimeHub::new(4);
        hub.publish(update(2, &newest_first(2))).await;
        hub.publish(update(1, &newest_first(1))).await;

        let mut subscription = hub.subscribe().await;
        match subscription.recv().await {
            Some(HubMessage::EventsUpdate(snapshot)) => assert_eq!(snapshot.len(), 2),
            other => panic!("expected catch-up, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_delivering_to_others_when_one_disconnects() {
        let hub = RealtimeHub::new(4);
        let mut healthy = hub.subscribe().await;
        let broken = hub.subscribe().await;
        drop(broken);
        let _ = healthy.recv().await;

        hub.publish(update(1, &newest_first(1))).await;

        assert!(matches!(healthy.recv().await, Some(HubMessage::LprEvent(_))));
        assert!(matches!(healthy.recv().await, Some(HubMessage::EventsUpdate(_))));
        assert_eq!(hub.subscriber_count().await, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_drop_for_a_slow_viewer_without_blocking() {
        let hub = RealtimeHub::new(2);
        let _slow = hub.subscribe().await;
        let mut fast = hub.subscribe().await;
        let _ = fast.recv().await;

        let history = newest_first(10);
        for sequence in 1..=10u64 {
            hub.publish(update(sequence, &history)).await;
            assert!(matches!(fast.recv().await, Some(HubMessage::LprEvent(_))));
            assert!(matches!(fast.recv().await, Some(HubMessage::EventsUpdate(_))));
        }

        assert_eq!(hub.subscriber_count().await, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_unsubscribe_idempotently() {
        let hub = RealtimeHub::default();
        let subscription = hub.subscribe().await;
        assert!(hub.unsubscribe(&subscription.id()).await);
        assert!(!hub.unsubscribe(&subscription.id()).await);
        assert_eq!(hub.subscriber_count().await, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_stop_delivery_after_unsubscribe() {
        let hub = RealtimeHub::default();
        let mut subscription = hub.subscribe().await;
        let _ = subscription.recv().await;
        hub.unsubscribe(&subscription.id()).await;

        hub.publish(update(1, &newest_first(1))).await;

        assert!(subscription.recv().await.is_none());
    }

    #[rstest]
    fn it_should_serialize_with_socket_event_names() {
        let history = newest_first(1);
        let json = serde_json::to_value(HubMessage::LprEvent(history[0].clone())).unwrap();
        assert_eq!(json["type"], "lprEvent");
        assert_eq!(json["data"]["id"], "evt-1");

        let json = serde_json::to_value(HubMessage::EventsUpdate(history.into_iter().collect())).unwrap();
        assert_eq!(json["type"], "eventsUpdate");
        assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    }
}
