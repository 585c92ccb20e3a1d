/// Errors from blob store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backing service cannot be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// No object exists for the content id.
    #[error("content not found: {0}")]
    NotFound(String),

    /// The payload is invalid for the target store.
    #[error("payload rejected: {0}")]
    Rejected(String),

    /// Payload serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
