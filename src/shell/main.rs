use std::net::SocketAddr;
use tracing_subscriber::{EnvFilter, fmt};

use lpr_intake::shell::config::AppConfig;
use lpr_intake::shell::http::router;
use lpr_intake::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // optional .env, ignored when absent
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::from_config(&config);
    let app = router(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        events_limit = config.events_limit,
        live_updates = config.live_updates,
        "Plate event intake listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
