#![allow(dead_code)]
//! Route handlers for the four external operations of spec.md §6, plus the
//! project-creation write path the in-memory store needs.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::api::dto::{CreateProjectRequest, CreateProjectResponse};
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::orchestrator::{
    compute_load_curve, compute_sizing, compute_v2g, compute_v2g_for_project, LoadCurveRequest,
    LoadCurveResult, SizingRequest, SizingResult, V2gRequest, V2gResult,
};
use crate::repo::Project;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/load-curve", post(load_curve))
        .route("/sizing", post(sizing))
        .route("/v2g", post(v2g))
        .route("/projects", post(create_project))
        .route("/projects/:id/v2g", get(v2g_for_project))
}

async fn load_curve(
    State(state): State<AppState>,
    Json(body): Json<LoadCurveRequest>,
) -> Result<Json<LoadCurveResult>, ApiError> {
    let result = compute_load_curve(&body.fleet, &body.schedule, &body.tous, &state.config)?;
    Ok(Json(result))
}

async fn sizing(
    State(state): State<AppState>,
    Json(body): Json<SizingRequest>,
) -> Result<Json<SizingResult>, ApiError> {
    let result = compute_sizing(&body, &state.config)?;
    Ok(Json(result))
}

async fn v2g(
    State(state): State<AppState>,
    Json(body): Json<V2gRequest>,
) -> Result<Json<V2gResult>, ApiError> {
    let result = compute_v2g(&body, &state.config)?;
    Ok(Json(result))
}

async fn create_project(
    State(state): State<AppState>,
    Json(body): Json<CreateProjectRequest>,
) -> Json<CreateProjectResponse> {
    let id = Uuid::new_v4();
    state
        .repo
        .put_project(Project {
            id,
            station: body.station,
            fleet: body.fleet,
            schedule: body.schedule,
            tous: body.tous,
        })
        .await;
    Json(CreateProjectResponse { id })
}

async fn v2g_for_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<V2gResult>, ApiError> {
    let result = compute_v2g_for_project(id, state.repo.as_ref(), &state.config).await?;
    Ok(Json(result))
}
