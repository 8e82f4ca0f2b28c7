use axum::routing::{get, post};
use axum::Router;

use crate::handlers::journal;
use crate::state::AppState;

/// Routes mounted at `/journal`.
///
/// ```text
/// GET  /journal       -> get_journal
/// POST /journal/save  -> save_journal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/journal", get(journal::get_journal))
        .route("/journal/save", post(journal::save_journal))
}
