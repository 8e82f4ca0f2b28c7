//! Row mapping for the `journal_entries` table.

use ikigai_core::entry::JournalEntry;
use ikigai_core::types::{Timestamp, UserId};
use sqlx::FromRow;

use crate::error::StoreError;

/// A row from the `journal_entries` table. `responses` is stored as JSON text.
#[derive(Debug, Clone, FromRow)]
pub struct JournalEntryRow {
    pub id: String,
    pub user_id: String,
    pub responses: String,
    pub current_step: String,
    pub completed: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<JournalEntryRow> for JournalEntry {
    type Error = StoreError;

    fn try_from(row: JournalEntryRow) -> Result<Self, Self::Error> {
        let id = uuid::Uuid::parse_str(&row.id)
            .map_err(|e| StoreError::Corrupt(format!("journal entry id '{}': {e}", row.id)))?;
        let responses = serde_json::from_str(&row.responses)?;

        Ok(Self {
            id,
            user_id: UserId::new(row.user_id),
            responses,
            current_step: row.current_step,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
