use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use mindscreen_export::error::ExportError;
use mindscreen_session::error::SessionError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// A validation warning: the action was refused, the session is intact.
    Warning(String),
    Conflict(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    warning: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, warning) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, false),
            ApiError::Warning(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, true),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, false),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    false,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                warning,
            }),
        )
            .into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        ApiError::Warning(e.to_string())
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(format!("report generation failed: {e}"))
    }
}
