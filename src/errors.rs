#![allow(dead_code)]
//! Core error taxonomy (spec §7), following the controller's
//! `ScheduleValidationError`/`ChargerError` pattern: a flat `thiserror` enum
//! per concern, with `Display` messages the boundary can surface directly.

use thiserror::Error;

/// Errors the calculation core can report. `TransformerOverflow` is carried
/// separately as a non-fatal `Warning` (see below), never returned as an
/// `Err` — sizing still completes and the warning rides along in the
/// result.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("malformed time string: {0}")]
    MalformedTimeString(String),

    #[error("could not parse schedule/tariff payload: {0}")]
    SerializationFailure(String),

    #[error("unexpected internal error: {0}")]
    Unexpected(String),
}

impl From<crate::domain::time_grid::MalformedTimeString> for CoreError {
    fn from(e: crate::domain::time_grid::MalformedTimeString) -> Self {
        CoreError::MalformedTimeString(e.to_string())
    }
}

/// A non-fatal condition attached to an otherwise-successful result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Warning {
    pub code: WarningCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    TransformerOverflow,
    TouCoverageFallback,
    EmptySchedule,
}

impl Warning {
    pub fn transformer_overflow(excess_kw: rust_decimal::Decimal) -> Self {
        Self {
            code: WarningCode::TransformerOverflow,
            message: format!(
                "ESS rated power exceeds the configured transformer capacity by {} kW",
                excess_kw
            ),
        }
    }

    pub fn tou_coverage_fallback(slot: &str) -> Self {
        Self {
            code: WarningCode::TouCoverageFallback,
            message: format!("slot {slot} has no TOU period coverage; used mean price fallback"),
        }
    }

    pub fn empty_schedule() -> Self {
        Self {
            code: WarningCode::EmptySchedule,
            message: "weekly schedule is empty; all days treated as non-operating".to_string(),
        }
    }
}
