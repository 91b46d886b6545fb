// WebSocket transport for the realtime hub.
//
// One hub subscription per socket. The catch-up snapshot and every later push are
// written as JSON text frames; the subscription is dropped as soon as either side closes.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::adapters::broadcast::realtime_hub::RealtimeHub;

/// Mounted with the hub as its own state, only when live updates are enabled.
pub async fn upgrade(ws: WebSocketUpgrade, State(hub): State<Arc<RealtimeHub>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_updates(socket, hub))
}

async fn stream_updates(socket: WebSocket, hub: Arc<RealtimeHub>) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscription = hub.subscribe().await;
    let subscriber_id = subscription.id();

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = subscription.recv().await {
            let json = match serde_json::to_string(&message) {
                Ok(j) => j,
                Err(e) => {
                    tracing::error!(error = %e, message_type = message.kind(), "Failed to serialize hub message");
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
    });

    // Inbound frames are ignored apart from close; pings are answered by axum.
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Err(e) => {
                    tracing::warn!(subscriber_id = %subscriber_id, error = %e, "WebSocket error");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    hub.unsubscribe(&subscriber_id).await;
}
