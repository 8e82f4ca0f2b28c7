pub mod health;
pub mod journal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(journal::router())
}
