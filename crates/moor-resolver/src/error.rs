use moor_refs::{RefError, StoreKind};
use moor_store::StoreError;

/// Errors from the resolver's write path.
///
/// The read path never returns an error as a whole — per-attribute
/// failures surface inside [`crate::ResolvedAttributes`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No adapter is registered for the target store kind.
    #[error("no adapter registered for {0} store")]
    NoAdapter(StoreKind),

    /// Encoding the on-chain reference string failed.
    #[error("reference encoding failed: {0}")]
    Encode(#[from] RefError),

    /// A store write failed; the batch it belonged to was aborted.
    #[error("store write failed for attribute {key}: {source}")]
    Store { key: String, source: StoreError },
}

/// Result alias for resolver write-path operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
