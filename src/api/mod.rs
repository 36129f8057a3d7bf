pub mod dto;
pub mod error;
pub mod health;
pub mod schedule_json;
pub mod v1;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::StationEngineConfig;
use crate::repo::Repositories;

/// Shared handler state: immutable config plus the project store, mirroring
/// the controller's `AppState` (`Arc`-wrapped config + repo handles, cheap to
/// clone per request).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<StationEngineConfig>,
    pub repo: Arc<dyn Repositories>,
}

pub fn router(state: AppState) -> Router {
    let enable_cors = state.config.server.enable_cors;

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/v1", v1::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}
