use moor_ledger::LedgerError;
use moor_types::{CollectionId, InstanceId};

/// Errors from asset graph assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// No core record exists for the asset.
    #[error("asset {collection}/{instance} not found")]
    AssetNotFound {
        collection: CollectionId,
        instance: InstanceId,
    },

    /// A storage entry could not be interpreted as its map's record shape.
    #[error("malformed record in map {map} at {key}: {reason}")]
    MalformedRecord {
        map: String,
        key: String,
        reason: String,
    },

    /// A ledger query failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Result alias for assembly operations.
pub type GraphResult<T> = Result<T, GraphError>;
