use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use pressline_core::error::CoreError;
use pressline_export::error::ExportError;

/// Unified API error type for the route handlers.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    MethodNotAllowed,
    /// The renderer reported a terminal error.
    RenderFailed(String),
    /// Anything else that went wrong while handling the request.
    Unexpected(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => {
                tracing::debug!("rejected request: {msg}");
                (StatusCode::BAD_REQUEST, msg, None)
            }
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method not allowed".to_string(),
                None,
            ),
            ApiError::RenderFailed(msg) => {
                tracing::error!("PDF generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF generation failed".to_string(),
                    None,
                )
            }
            ApiError::Unexpected(msg) => {
                tracing::error!("request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to generate PDF".to_string(),
                    Some(msg),
                )
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Serialization(inner) => ApiError::Unexpected(inner.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::RenderFailed(e.to_string())
    }
}
