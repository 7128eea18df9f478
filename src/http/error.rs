//! API error taxonomy.
//!
//! # Design Decisions
//! - Clients receive a stable machine-readable error kind; the full detail
//!   stays in the server-side ERROR log
//! - Expected non-error outcomes ("Unknown" diagnosis, empty facility list)
//!   and admission rejections never pass through this type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Registration could not store the account.
    #[error("registration failed: {0}")]
    Registration(String),

    /// Catch-all for unhandled internal failures.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Stable machine-readable kind sent to clients.
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Registration(_) => "registration_failed",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.kind() })),
        )
            .into_response()
    }
}
