//! Durable store backed by SQLite.

use async_trait::async_trait;
use chrono::Utc;
use ikigai_core::entry::{JournalEntry, SaveJournalEntry, COMPLETED_FALSE, DEFAULT_CURRENT_STEP};
use ikigai_core::types::UserId;

use super::{JournalRepository, UserRepository};
use crate::error::StoreError;
use crate::models::journal_entry::JournalEntryRow;
use crate::models::user::{CreateUser, User, UserRow};
use crate::DbPool;

/// Column list for `journal_entries` queries.
const ENTRY_COLUMNS: &str = "\
    id, user_id, responses, current_step, completed, \
    created_at, updated_at";

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, username, created_at";

/// SQLite-backed journal and user store.
///
/// The unique index on `journal_entries.user_id` enforces one entry per
/// user, and upserts run as a single `ON CONFLICT` statement.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Connect to `database_url` and apply migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing, already migrated pool.
    pub fn from_pool(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Map a unique-constraint violation to [`StoreError::Conflict`].
fn classify_insert_error(err: sqlx::Error, what: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(format!("{what} already exists"))
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait]
impl JournalRepository for SqliteStore {
    async fn fetch_entry(&self, user_id: &UserId) -> Result<Option<JournalEntry>, StoreError> {
        let query = format!("SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE user_id = ?1");
        let row = sqlx::query_as::<_, JournalEntryRow>(&query)
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(JournalEntry::try_from).transpose()
    }

    async fn upsert_entry(
        &self,
        user_id: &UserId,
        payload: &SaveJournalEntry,
    ) -> Result<JournalEntry, StoreError> {
        let responses = serde_json::to_string(&payload.responses)?;
        let query = format!(
            "INSERT INTO journal_entries \
                 (id, user_id, responses, current_step, completed, created_at, updated_at) \
             VALUES (?1, ?2, ?3, COALESCE(?4, '{DEFAULT_CURRENT_STEP}'), \
                     COALESCE(?5, '{COMPLETED_FALSE}'), ?6, ?6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 responses = excluded.responses, \
                 current_step = COALESCE(?4, journal_entries.current_step), \
                 completed = COALESCE(?5, journal_entries.completed), \
                 updated_at = excluded.updated_at \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JournalEntryRow>(&query)
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(user_id.as_str())
            .bind(responses)
            .bind(payload.current_step.as_deref())
            .bind(payload.completed.as_deref())
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        JournalEntry::try_from(row)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, username, created_at) VALUES (?1, ?2, ?3) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(uuid::Uuid::new_v4().to_string())
            .bind(&input.username)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify_insert_error(e, &format!("User '{}'", input.username)))?;
        Ok(row.into())
    }

    async fn ensure_user(&self, id: &UserId) -> Result<User, StoreError> {
        sqlx::query(
            "INSERT INTO users (id, username, created_at) VALUES (?1, ?1, ?2) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| classify_insert_error(e, &format!("User '{id}'")))?;

        self.get_user(id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("user '{id}' missing after seed")))
    }
}
