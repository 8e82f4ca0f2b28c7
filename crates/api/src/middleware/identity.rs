//! Journal owner extractor for Axum handlers.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ikigai_core::types::UserId;

use crate::state::AppState;

/// Identity that owns the journal for the current request.
///
/// The deployment serves a single journal owner taken from
/// `JOURNAL_USER_ID`. Handlers receive it through this extractor so the
/// repositories never assume a particular user.
///
/// ```ignore
/// async fn my_handler(JournalOwner(user_id): JournalOwner) -> AppResult<Json<()>> {
///     tracing::info!(%user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JournalOwner(pub UserId);

impl FromRequestParts<AppState> for JournalOwner {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(JournalOwner(state.config.journal_user_id.clone()))
    }
}
