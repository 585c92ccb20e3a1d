use moor_types::CompositeKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A normalized ledger storage entry: composite key plus decoded value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageEntry {
    pub key: CompositeKey,
    pub value: Value,
}

impl StorageEntry {
    pub fn new(key: impl Into<CompositeKey>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Pagination cursor for range iteration, passed through to the backend's
/// native cursor unchanged.
///
/// `start_key` is exclusive: the page resumes after it, matching the
/// resume-from-last-returned-key contract of paged storage iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub start_key: Option<CompositeKey>,
    pub page_size: Option<u32>,
}

impl Pagination {
    /// No cursor, no size cap: the whole range in one page.
    pub fn all() -> Self {
        Self::default()
    }

    /// Cap the page at `size` entries.
    pub fn page_size(size: u32) -> Self {
        Self {
            start_key: None,
            page_size: Some(size),
        }
    }

    /// Resume after `key` with a page cap.
    pub fn resume_after(key: CompositeKey, size: u32) -> Self {
        Self {
            start_key: Some(key),
            page_size: Some(size),
        }
    }
}

/// An opaque transaction to submit to the ledger.
///
/// Signing and wire encoding belong to the transport; the core only names
/// the call and carries its decoded parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCall {
    pub extrinsic: String,
    pub signer: String,
    pub params: Vec<Value>,
}

impl TransactionCall {
    pub fn new(
        extrinsic: impl Into<String>,
        signer: impl Into<String>,
        params: Vec<Value>,
    ) -> Self {
        Self {
            extrinsic: extrinsic.into(),
            signer: signer.into(),
            params,
        }
    }
}

/// Acknowledgement of an accepted transaction submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_types::{CollectionId, InstanceId};

    #[test]
    fn entry_construction() {
        let entry = StorageEntry::new(
            (CollectionId(1), InstanceId(0)),
            serde_json::json!({"owner": "5F3s"}),
        );
        assert_eq!(entry.key.len(), 2);
    }

    #[test]
    fn pagination_defaults_to_everything() {
        let page = Pagination::all();
        assert_eq!(page.start_key, None);
        assert_eq!(page.page_size, None);
    }
}
