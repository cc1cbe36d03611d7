//! Application error types and their JSON wire shapes.
//!
//! Three terminal failure classes: validation errors (400, one entry per
//! malformed id-shaped parameter), not-found (404 with a stable machine
//! code per resource type), and unexpected/store errors (500, details
//! logged but never leaked). Nothing is retried internally.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single malformed request parameter.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{message}")]
    NotFound {
        code: &'static str,
        message: &'static str,
    },

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn college_not_found() -> Self {
        Self::NotFound {
            code: "COLLEGE_NOT_FOUND",
            message: "College not found",
        }
    }

    pub fn course_not_found() -> Self {
        Self::NotFound {
            code: "COURSE_NOT_FOUND",
            message: "Course not found",
        }
    }

    pub fn state_not_found() -> Self {
        Self::NotFound {
            code: "STATE_NOT_FOUND",
            message: "State not found",
        }
    }

    pub fn city_not_found() -> Self {
        Self::NotFound {
            code: "CITY_NOT_FOUND",
            message: "City not found",
        }
    }

    pub fn enquiry_not_found() -> Self {
        Self::NotFound {
            code: "ENQUIRY_NOT_FOUND",
            message: "Enquiry not found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "Validation failed",
                    "errors": errors,
                })),
            )
                .into_response(),
            AppError::NotFound { code, message } => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "success": false,
                    "error": message,
                    "code": code,
                })),
            )
                .into_response(),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": message,
                })),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                internal_error_response()
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "internal server error");
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Internal server error",
        })),
    )
        .into_response()
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
