use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::adapters::inbound::http::{cameras, events, health, ingest, live};
use crate::shell::config::AppConfig;
use crate::shell::state::AppState;

pub fn router(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/ping", get(health::ping))
        .route("/", get(events::list))
        .route("/events", get(events::list).post(ingest::handle))
        .route("/heartbeat", post(ingest::handle))
        .route("/events/recent", get(events::recent))
        .route("/events/latest", get(events::latest))
        .route("/events/page", get(events::page))
        .route("/events/slice", get(events::slice))
        .route("/cameras/status", get(cameras::status));

    if let Some(hub) = state.hub.clone() {
        router = router.merge(Router::new().route("/ws", get(live::upgrade)).with_state::<AppState>(hub));
    } else {
        tracing::info!("Live updates disabled, REST endpoints only");
    }

    router
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(cors_layer(&config.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);
    match origin {
        "*" => layer.allow_origin(Any),
        // validated when the config was loaded
        origin => match HeaderValue::from_str(origin) {
            Ok(value) => layer.allow_origin(value),
            Err(_) => layer,
        },
    }
}
