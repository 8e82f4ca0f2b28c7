use reqwest::StatusCode;

/// Errors emitted by [`SyncClient`](crate::sync::SyncClient).
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("sync request rejected with status {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}
