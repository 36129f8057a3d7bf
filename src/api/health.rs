#![allow(dead_code)]
//! Liveness/readiness endpoints. The engine has no external dependencies to
//! probe (no database, no hardware) — readiness degrades to liveness.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/ready
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /health/live
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
