//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ports::PortError;

/// Errors surfaced by the service layer.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request payload is missing or malformed.
    #[error("{0}")]
    BadRequest(String),

    /// No valid credentials were presented.
    #[error("{0}")]
    Unauthorized(String),

    /// The caller is signed in but may not touch this resource.
    #[error("Forbidden")]
    Forbidden,

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The write conflicts with existing data.
    #[error("{0}")]
    Conflict(String),

    /// The hosted backend failed.
    #[error("Backend error: {0}")]
    Backend(#[from] PortError),
}

impl AppError {
    /// Shorthand for the generic 401 response.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::Unauthorized("Unauthorized".to_string())
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
