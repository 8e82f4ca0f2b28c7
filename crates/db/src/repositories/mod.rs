//! Repository layer.
//!
//! The sync endpoint talks to storage only through [`JournalRepository`]
//! and [`UserRepository`]. Every operation takes the owning identity
//! explicitly; no store assumes a particular user.

use async_trait::async_trait;
use ikigai_core::entry::{JournalEntry, SaveJournalEntry};
use ikigai_core::types::UserId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStore;

/// Storage contract for journal entries: at most one entry per user.
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Fetch the entry owned by `user_id`.
    ///
    /// Returns `None` if the user has never saved. Absence is not an error.
    async fn fetch_entry(&self, user_id: &UserId) -> Result<Option<JournalEntry>, StoreError>;

    /// Create or update the entry owned by `user_id`.
    ///
    /// An existing entry keeps its id and has only the fields present in
    /// `payload` overwritten; otherwise a new entry with a fresh id is
    /// created. The read-modify-write is atomic per user and the last
    /// writer wins.
    async fn upsert_entry(
        &self,
        user_id: &UserId,
        payload: &SaveJournalEntry,
    ) -> Result<JournalEntry, StoreError>;

    /// Verify the store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Storage contract for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Create a user with a generated id.
    ///
    /// Returns [`StoreError::Conflict`] if the username is taken.
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Make sure a user with id `id` exists, creating it (username = id)
    /// when missing. Used to seed the deployment identity.
    async fn ensure_user(&self, id: &UserId) -> Result<User, StoreError>;
}
