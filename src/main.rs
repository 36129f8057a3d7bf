use std::sync::Arc;

use anyhow::Result;
use station_sizing_engine::config::StationEngineConfig;
use station_sizing_engine::repo::InMemoryRepositories;
use station_sizing_engine::telemetry::{self, init_tracing};
use station_sizing_engine::api;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = StationEngineConfig::load()?;
    let addr = cfg.server.socket_addr()?;

    let state = api::AppState {
        config: Arc::new(cfg),
        repo: Arc::new(InMemoryRepositories::new()),
    };

    let app = api::router(state);

    info!(%addr, "starting station sizing engine");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
