use std::sync::Arc;

use ikigai_db::repositories::{InMemoryStore, JournalRepository, SqliteStore, UserRepository};
use ikigai_db::StoreError;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Journal entry repository.
    pub journals: Arc<dyn JournalRepository>,
    /// User repository.
    pub users: Arc<dyn UserRepository>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around a store that serves both repositories.
    pub fn with_store<S>(store: S, config: ServerConfig) -> Self
    where
        S: JournalRepository + UserRepository + Clone + 'static,
    {
        Self {
            journals: Arc::new(store.clone()),
            users: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Open the store selected by `config` and seed the journal owner.
    ///
    /// A configured `DATABASE_URL` selects the SQLite store; otherwise
    /// entries are kept in memory.
    pub async fn from_config(config: ServerConfig) -> Result<Self, StoreError> {
        let state = match config.database_url.clone() {
            Some(url) => {
                let store = SqliteStore::connect(&url).await?;
                tracing::info!("SQLite journal store opened and migrated");
                Self::with_store(store, config)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, journal entries are kept in memory only");
                Self::with_store(InMemoryStore::new(), config)
            }
        };

        let owner = state.users.ensure_user(&state.config.journal_user_id).await?;
        tracing::info!(user_id = %owner.id, "Journal owner ready");

        Ok(state)
    }
}
