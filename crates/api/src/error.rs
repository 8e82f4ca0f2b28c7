use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ikigai_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Each variant carries the journal endpoint's fixed client-facing message;
/// the underlying [`StoreError`] or validation detail is only logged.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A journal save body that is missing, unparseable or fails validation.
    /// The detail is logged; clients only see "Invalid data".
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The store failed while fetching the journal entry.
    #[error("Failed to fetch journal entry: {0}")]
    FetchFailed(StoreError),

    /// The store failed while saving the journal entry.
    #[error("Failed to save journal entry: {0}")]
    SaveFailed(StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidData(detail) => {
                tracing::warn!(detail = %detail, "Rejected journal payload");
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Invalid data".to_string(),
                )
            }
            AppError::FetchFailed(err) => {
                tracing::error!(error = %err, "Journal fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Failed to fetch journal entry".to_string(),
                )
            }
            AppError::SaveFailed(err) => {
                tracing::error!(error = %err, "Journal save failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Failed to save journal entry".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
