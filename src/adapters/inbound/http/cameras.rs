use axum::{Json, extract::State, response::IntoResponse};

use crate::application::query_handlers::event_queries::EventQueries;
use crate::core::ports::Clock;
use crate::shell::state::AppState;

pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.queries.camera_statuses(state.clock.now()).await)
}

#[cfg(test)]
mod cameras_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use chrono::{TimeDelta, TimeZone, Utc};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::clock::FixedClock;
    use crate::shell::config::AppConfig;
    use crate::shell::state::AppState;
    use crate::test_support::fixtures::submissions::PlateEventSubmissionBuilder;

    use super::status;

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/cameras/status", get(status))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_report_online_and_offline_cameras_sorted_by_id() {
        let clock = Arc::new(FixedClock::new(
            Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        ));
        let state = AppState::with_clock(&AppConfig::default(), clock.clone());
        for camera in ["gate-west", "gate-east"] {
            state
                .ingest_handler
                .handle(PlateEventSubmissionBuilder::new().camera_id(Some(camera)).build())
                .await
                .unwrap();
            clock.advance(TimeDelta::minutes(6));
        }

        let response = app(state)
            .oneshot(Request::get("/cameras/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "CameraId": "gate-east", "lastSeen": "2023-11-14T22:19:20.000Z", "isOnline": true },
                { "CameraId": "gate-west", "lastSeen": "2023-11-14T22:13:20.000Z", "isOnline": false },
            ])
        );
    }
}
