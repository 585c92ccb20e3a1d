/// Errors from ledger client operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The ledger node cannot be reached.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),

    /// A storage entry does not match the expected shape for its map.
    #[error("malformed entry in map {map}: {reason}")]
    MalformedEntry { map: String, reason: String },

    /// Value serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
