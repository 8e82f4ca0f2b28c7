//! Process-lifetime store with no eviction and no persistence.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ikigai_core::entry::{JournalEntry, SaveJournalEntry};
use ikigai_core::types::UserId;
use tokio::sync::Mutex;

use super::{JournalRepository, UserRepository};
use crate::error::StoreError;
use crate::models::user::{CreateUser, User};

/// In-memory journal and user store.
///
/// Entries are keyed by owner, so a user can never hold two entries. Each
/// map sits behind its own async mutex and an upsert holds the lock for the
/// whole read-modify-write. Clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    journals: Arc<Mutex<HashMap<UserId, JournalEntry>>>,
    users: Arc<Mutex<HashMap<UserId, User>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored journal entries.
    pub async fn entry_count(&self) -> usize {
        self.journals.lock().await.len()
    }
}

#[async_trait]
impl JournalRepository for InMemoryStore {
    async fn fetch_entry(&self, user_id: &UserId) -> Result<Option<JournalEntry>, StoreError> {
        Ok(self.journals.lock().await.get(user_id).cloned())
    }

    async fn upsert_entry(
        &self,
        user_id: &UserId,
        payload: &SaveJournalEntry,
    ) -> Result<JournalEntry, StoreError> {
        let now = Utc::now();
        let mut journals = self.journals.lock().await;

        let entry = match journals.get_mut(user_id) {
            Some(existing) => {
                existing.apply(payload, now);
                existing.clone()
            }
            None => {
                let created = JournalEntry::create(user_id.clone(), payload, now);
                tracing::debug!(%user_id, entry_id = %created.id, "Created journal entry");
                journals.insert(user_id.clone(), created.clone());
                created
            }
        };

        Ok(entry)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().await.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.lock().await;
        if users.values().any(|user| user.username == input.username) {
            return Err(StoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let user = User {
            id: UserId::new(uuid::Uuid::new_v4().to_string()),
            username: input.username.clone(),
            created_at: Utc::now(),
        };
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn ensure_user(&self, id: &UserId) -> Result<User, StoreError> {
        let mut users = self.users.lock().await;
        if let Some(existing) = users.get(id) {
            return Ok(existing.clone());
        }
        if users.values().any(|user| user.username == id.as_str()) {
            return Err(StoreError::Conflict(format!(
                "Username '{id}' is already taken by another user"
            )));
        }

        let user = User {
            id: id.clone(),
            username: id.as_str().to_owned(),
            created_at: Utc::now(),
        };
        users.insert(id.clone(), user.clone());
        Ok(user)
    }
}
