#![allow(dead_code)]
//! EV charging-station storage-sizing and V2G arbitrage calculation engine.
//!
//! `domain` holds the value objects (C1/C2), `scheduler` the day/week
//! schedulers (C3–C5), `sizing`/`economics` the transformer/ESS/financial
//! modules (C6/C7), and `orchestrator` the four external entry points (C8).
//! `api`/`config`/`telemetry`/`repo` are the thin boundary layer the core is
//! exercised through; they carry no independent business logic.

pub mod api;
pub mod config;
pub mod domain;
pub mod economics;
pub mod errors;
pub mod orchestrator;
pub mod repo;
pub mod scheduler;
pub mod sizing;
pub mod telemetry;
