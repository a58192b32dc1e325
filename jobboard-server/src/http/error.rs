//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses `{ "error", "message" }` with the
//! matching status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::BoardError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Gated operation without a verified caller (401)
    Unauthenticated,

    /// Validation failed (400)
    Validation(ValidationError),

    /// Malformed request body (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Unique field already taken (409)
    Conflict {
        resource: &'static str,
        field: &'static str,
    },

    /// Referenced record does not exist (422)
    InvalidReference { resource: &'static str, id: String },

    /// Store or other internal failure (500, logged)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvalidReference { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Unauthenticated => json!({
                "error": "authentication_required",
                "message": "authentication required"
            }),
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string(),
                "field": e.field()
            }),
            Self::BadRequest { message } => json!({
                "error": "validation_error",
                "message": message
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Conflict { resource, field } => json!({
                "error": "conflict",
                "message": format!("{} with this {} already exists", resource, field)
            }),
            Self::InvalidReference { resource, id } => json!({
                "error": "invalid_reference",
                "message": format!("{} '{}' does not exist", resource, id)
            }),
            Self::Internal { message } => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", message);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<BoardError> for ApiError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::AuthenticationRequired => Self::Unauthenticated,
            BoardError::Validation(e) => Self::Validation(e),
            BoardError::NotFound { resource, id } => Self::NotFound { resource, id },
            BoardError::Conflict { resource, field } => Self::Conflict { resource, field },
            BoardError::InvalidReference { resource, id } => Self::InvalidReference { resource, id },
            BoardError::Upstream(e) => Self::Internal {
                message: e.to_string(),
            },
        }
    }
}
