//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered into an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use seo_writer_core::{error::CoreError, ports::PortError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A rule of the writer itself was violated (bad input, busy session, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Core(CoreError::Validation(_)) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Core(CoreError::ImportFormat(_)) => (StatusCode::BAD_REQUEST, "IMPORT_FORMAT"),
            ApiError::Core(CoreError::NotFound { .. }) | ApiError::Port(PortError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            ApiError::Core(CoreError::SessionBusy) => (StatusCode::CONFLICT, "SESSION_BUSY"),
            ApiError::Core(CoreError::Generation(_)) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILED"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Request failed: {:?}", self);
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };
        (status, Json(ErrorBody { error: message, code: code.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_client_statuses() {
        let cases = [
            (ApiError::from(CoreError::Validation("x".into())), StatusCode::BAD_REQUEST),
            (ApiError::from(CoreError::ImportFormat("x".into())), StatusCode::BAD_REQUEST),
            (
                ApiError::from(CoreError::NotFound { entity: "Article", id: "1".into() }),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(CoreError::SessionBusy), StatusCode::CONFLICT),
            (ApiError::from(CoreError::Generation("x".into())), StatusCode::BAD_GATEWAY),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
