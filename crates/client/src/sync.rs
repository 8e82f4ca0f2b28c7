//! Explicit saves to and loads from the journal sync server.

use ikigai_core::entry::{JournalEntry, SaveJournalEntry};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::SyncError;

/// Path of the fetch endpoint, relative to the server base URL.
pub const JOURNAL_PATH: &str = "/api/journal";

/// Path of the save endpoint, relative to the server base URL.
pub const SAVE_PATH: &str = "/api/journal/save";

/// HTTP client for the journal sync endpoint.
#[derive(Debug, Clone)]
pub struct SyncClient {
    client: Client,
    base_url: String,
}

impl SyncClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the stored entry; `None` when nothing has been saved yet.
    pub async fn fetch(&self) -> Result<Option<JournalEntry>, SyncError> {
        let response = self
            .client
            .get(format!("{}{JOURNAL_PATH}", self.base_url))
            .send()
            .await?;
        read_json(response).await
    }

    /// Save `payload`, returning the entry as stored by the server.
    pub async fn save(&self, payload: &SaveJournalEntry) -> Result<JournalEntry, SyncError> {
        let response = self
            .client
            .post(format!("{}{SAVE_PATH}", self.base_url))
            .json(payload)
            .send()
            .await?;
        let entry: JournalEntry = read_json(response).await?;
        tracing::debug!(entry_id = %entry.id, current_step = %entry.current_step, "Journal synced");
        Ok(entry)
    }
}

/// Decode a success body, or turn an error status into [`SyncError::Rejected`]
/// carrying the server's `error` message.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or(text);

    tracing::warn!(%status, %message, "Sync request rejected");
    Err(SyncError::Rejected { status, message })
}
