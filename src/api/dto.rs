#![allow(dead_code)]
//! Request/response bodies for the `/v1` boundary (SPEC_FULL §4.11). Thin
//! wrappers over the core's own value objects — no independent validation or
//! business logic lives here, only JSON shape.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::fleet::{FleetConfig, StationConfig, WeeklySchedule};
use crate::domain::tariff::TouPeriod;

/// `POST /v1/projects` body: the inputs `computeV2GForProject` will later
/// load by id. Not one of spec.md's external operations itself — added so
/// the in-memory project store has a write path to exercise the read path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub station: StationConfig,
    pub fleet: FleetConfig,
    pub schedule: WeeklySchedule,
    pub tous: Vec<TouPeriod>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProjectResponse {
    pub id: Uuid,
}
