use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use jiff::{Timestamp, Zoned};

use pressline_core::models::document::DocumentRequest;
use pressline_export::stream::render_stream;

use crate::error::ApiError;
use crate::state::AppState;

/// CORS preflight. The CORS headers themselves come from the route layer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Render the posted document and return it as a PDF attachment.
///
/// The response is only built once the renderer has reported its terminal
/// event, so a render failure can always still be reported as a 500.
pub async fn generate_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let requested_at = Timestamp::now();

    let spec = DocumentRequest::from_slice(&body)?.validate()?;

    let rendered = render_stream(
        spec,
        state.styles.as_ref().clone(),
        Zoned::now(),
        state.config.chunk_size,
    )
    .collect()
    .await?;

    tracing::info!(
        bytes = rendered.bytes.len(),
        chunks = rendered.chunks,
        "pdf rendered"
    );

    let headers: [(HeaderName, String); 4] = [
        (CONTENT_TYPE, "application/pdf".to_string()),
        (
            CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"document-{}.pdf\"",
                requested_at.as_millisecond()
            ),
        ),
        (
            CACHE_CONTROL,
            "no-cache, no-store, must-revalidate".to_string(),
        ),
        (CONTENT_LENGTH, rendered.bytes.len().to_string()),
    ];

    Ok((headers, rendered.bytes).into_response())
}
