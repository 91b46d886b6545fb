// Read endpoints over the retained history.
//
// Query parameters are signed so that negative values clamp to zero instead of
// being rejected by the extractor.

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::TimeDelta;
use serde::Deserialize;

use crate::application::query_handlers::event_queries::EventQueries;
use crate::core::ports::Clock;
use crate::shell::state::AppState;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Deserialize)]
pub struct RecentParams {
    pub window_ms: Option<i64>,
}

#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Deserialize)]
pub struct SliceParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

fn clamp(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.queries.list_events().await)
}

pub async fn recent(
    State(state): State<AppState>,
    Query(params): Query<RecentParams>,
) -> impl IntoResponse {
    let window = params
        .window_ms
        .map_or(state.active_window, |ms| TimeDelta::milliseconds(ms.max(0)));
    Json(state.queries.recent_events(state.clock.now(), window).await)
}

pub async fn latest(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.queries.latest_per_camera().await)
}

pub async fn page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> impl IntoResponse {
    Json(
        state
            .queries
            .page_events(
                clamp(params.page.unwrap_or(1)),
                clamp(params.page_size.unwrap_or(DEFAULT_PAGE_SIZE)),
            )
            .await,
    )
}

pub async fn slice(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> impl IntoResponse {
    let limit = params.limit.map_or(state.events_limit, clamp);
    Json(
        state
            .queries
            .slice_events(clamp(params.offset.unwrap_or(0)), limit)
            .await,
    )
}
