#![allow(dead_code)]
//! Maps `CoreError` (and boundary-level failures) to HTTP responses, per
//! spec §7's propagation policy: `MissingInput`/`MalformedTimeString` -> 400,
//! `SerializationFailure` -> 400 (degraded, never silently swallowed at this
//! layer), `Unexpected`/anything else -> 500. `TransformerOverflow` never
//! reaches here -- it rides inside a 200 response's `warnings` field.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Core(CoreError::MissingInput(_))
            | ApiError::Core(CoreError::MalformedTimeString(_))
            | ApiError::Core(CoreError::SerializationFailure(_)) => StatusCode::BAD_REQUEST,
            ApiError::Core(CoreError::Unexpected(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Core(CoreError::MissingInput(_)) => "MissingInput",
            ApiError::Core(CoreError::MalformedTimeString(_)) => "MalformedTimeString",
            ApiError::Core(CoreError::SerializationFailure(_)) => "SerializationFailure",
            ApiError::Core(CoreError::Unexpected(_)) => "Unexpected",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "rejected request");
        }

        let body = ErrorResponse {
            error: self.error_type().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
