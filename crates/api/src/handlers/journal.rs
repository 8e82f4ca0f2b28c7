//! Handlers for the journal sync endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use ikigai_core::entry::{JournalEntry, SaveJournalEntry};

use crate::error::{AppError, AppResult};
use crate::middleware::identity::JournalOwner;
use crate::state::AppState;

/// GET /api/journal
///
/// Returns the owner's entry, or `null` when nothing has been saved yet.
pub async fn get_journal(
    JournalOwner(user_id): JournalOwner,
    State(state): State<AppState>,
) -> AppResult<Json<Option<JournalEntry>>> {
    let entry = state
        .journals
        .fetch_entry(&user_id)
        .await
        .map_err(AppError::FetchFailed)?;

    Ok(Json(entry))
}

/// POST /api/journal/save
///
/// Validates the whole body before touching the store, then creates or
/// updates the owner's single entry and returns it.
pub async fn save_journal(
    JournalOwner(user_id): JournalOwner,
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<JournalEntry>> {
    let Json(value) = body.map_err(|rejection| AppError::InvalidData(rejection.body_text()))?;

    let payload =
        SaveJournalEntry::from_json(value).map_err(|e| AppError::InvalidData(e.to_string()))?;

    let entry = state
        .journals
        .upsert_entry(&user_id, &payload)
        .await
        .map_err(AppError::SaveFailed)?;

    tracing::info!(
        user_id = %user_id,
        entry_id = %entry.id,
        current_step = %entry.current_step,
        "Journal entry saved"
    );

    Ok(Json(entry))
}
