use async_trait::async_trait;
use moor_types::CompositeKey;
use serde_json::Value;

use crate::entries::{Pagination, StorageEntry, SubmitReceipt, TransactionCall};
use crate::error::LedgerResult;

/// Async boundary to the ledger node.
///
/// Implementations must be `Send + Sync` and hold no mutable state across
/// calls: every query operates on its own data and callers correlate
/// results by key, never by completion order.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Point lookup of one storage value by its full composite key.
    ///
    /// Returns `Ok(None)` if no entry exists at the key.
    async fn query(&self, map: &str, key: &CompositeKey) -> LedgerResult<Option<Value>>;

    /// Range iteration over all entries whose key starts with `prefix`,
    /// normalized into [`StorageEntry`] records in key order.
    ///
    /// `pagination` is handed to the backend's native cursor; one call
    /// returns one page.
    async fn query_entries(
        &self,
        map: &str,
        prefix: &CompositeKey,
        pagination: &Pagination,
    ) -> LedgerResult<Vec<StorageEntry>>;

    /// Batched lookup of several full keys.
    ///
    /// Output order matches input key order: callers zip the results
    /// positionally against `keys`, so any reordering is a correctness
    /// bug. The default implementation performs sequential point lookups;
    /// backends with a native batch call should override it.
    async fn query_multi(
        &self,
        map: &str,
        keys: &[CompositeKey],
    ) -> LedgerResult<Vec<Option<Value>>> {
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            values.push(self.query(map, key).await?);
        }
        Ok(values)
    }

    /// Submit a transaction and wait for acceptance.
    async fn submit(&self, call: &TransactionCall) -> LedgerResult<SubmitReceipt>;
}
