//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use mirage_core::error::{AppError, ErrorKind};

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// An `AppError` on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Error response envelope: `{"error": {"type": ..., "message": ...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error kind, e.g. `NOT_FOUND`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = StatusCode::from_u16(err.kind.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if err.kind == ErrorKind::Internal {
            match &err.source {
                Some(source) => {
                    tracing::error!(error = %err.message, source = %source, "Internal server error")
                }
                None => tracing::error!(error = %err.message, "Internal server error"),
            }
            "Internal server error".to_string()
        } else {
            err.message
        };

        let body = ErrorEnvelope {
            error: ErrorBody {
                kind: err.kind.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}
