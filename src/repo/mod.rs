#![allow(dead_code)]
//! In-memory project store behind a `Repositories`-style trait object,
//! mirroring the controller's `repo::Repositories` pattern. Real CRUD
//! persistence (sqlx/ORM) is the explicit non-goal of spec §1; this trait
//! exists purely so `computeV2GForProject` has somewhere to load inputs
//! from, and so a real adapter could later be swapped in without touching
//! the calculation core.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::domain::fleet::{FleetConfig, StationConfig, WeeklySchedule};
use crate::domain::tariff::TouPeriod;

#[derive(Debug, Clone)]
pub struct Project {
    pub id: Uuid,
    pub station: StationConfig,
    pub fleet: FleetConfig,
    pub schedule: WeeklySchedule,
    pub tous: Vec<TouPeriod>,
}

#[async_trait::async_trait]
pub trait Repositories: Send + Sync {
    async fn get_project(&self, id: Uuid) -> Option<Project>;
    async fn put_project(&self, project: Project);
}

#[derive(Default)]
pub struct InMemoryRepositories {
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Repositories for InMemoryRepositories {
    async fn get_project(&self, id: Uuid) -> Option<Project> {
        self.projects.read().expect("project store lock poisoned").get(&id).cloned()
    }

    async fn put_project(&self, project: Project) {
        self.projects
            .write()
            .expect("project store lock poisoned")
            .insert(project.id, project);
    }
}
