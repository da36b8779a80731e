use weft_types::ObjectId;

/// Errors from session store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing database file does not exist or cannot be opened.
    #[error("cannot open store: {0}")]
    Open(String),

    /// Error from the underlying SQLite backend.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload classified as a message object failed to decode.
    #[error("malformed message object {id}: {reason}")]
    MalformedMessage { id: ObjectId, reason: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
