use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::core::plate_event::PlateEvent;
use crate::core::plate_event::submission::PlateEventSubmission;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub event: Arc<PlateEvent>,
}

#[derive(Serialize)]
pub struct IngestRejection {
    pub error: String,
    pub missing: Vec<&'static str>,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<PlateEventSubmission>, JsonRejection>,
) -> impl IntoResponse {
    let Json(submission) = match body {
        Ok(b) => b,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable plate event body");
            // an oversized body keeps its own status (413)
            let status = match &rejection {
                JsonRejection::BytesRejection(_) => rejection.status(),
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            };
            return status.into_response();
        }
    };

    match state.ingest_handler.handle(submission).await {
        Ok(event) => (
            StatusCode::OK,
            Json(IngestResponse {
                success: true,
                event,
            }),
        )
            .into_response(),
        Err(ApplicationError::Validation(err)) => (
            StatusCode::BAD_REQUEST,
            Json(IngestRejection {
                error: err.to_string(),
                missing: err.missing,
            }),
        )
            .into_response(),
    }
}
