use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    /// The requested session does not exist under the directory root.
    ///
    /// Expected and non-exceptional: absent sessions are part of normal
    /// operation, so callers get a typed result rather than an I/O error.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("store error: {0}")]
    Store(#[from] weft_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
