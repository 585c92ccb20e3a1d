use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use moor_types::CompositeKey;
use serde_json::Value;

use crate::entries::{Pagination, StorageEntry, SubmitReceipt, TransactionCall};
use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;

/// In-memory ledger for tests, local demos, and embedding.
///
/// Storage maps are `BTreeMap`s over [`CompositeKey`], so prefix ranges
/// are contiguous and range iteration matches the ordering a real node
/// provides. Submitted transactions are appended to an inspectable log
/// rather than executed.
pub struct InMemoryLedger {
    state: RwLock<HashMap<String, BTreeMap<CompositeKey, Value>>>,
    submissions: RwLock<Vec<TransactionCall>>,
    offline: AtomicBool,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HashMap::new()),
            submissions: RwLock::new(Vec::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Seed one storage entry. Intended for test fixtures.
    pub fn insert(&self, map: &str, key: impl Into<CompositeKey>, value: Value) {
        let mut state = self.state.write().expect("lock poisoned");
        state
            .entry(map.to_string())
            .or_default()
            .insert(key.into(), value);
    }

    /// Remove one storage entry. Returns `true` if it existed.
    pub fn remove(&self, map: &str, key: &CompositeKey) -> bool {
        let mut state = self.state.write().expect("lock poisoned");
        state
            .get_mut(map)
            .map(|entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    /// All transactions submitted so far, in submission order.
    pub fn submissions(&self) -> Vec<TransactionCall> {
        self.submissions.read().expect("lock poisoned").clone()
    }

    /// Simulate the node being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> LedgerResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable(
                "ledger offline (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn query(&self, map: &str, key: &CompositeKey) -> LedgerResult<Option<Value>> {
        self.check_online()?;
        let state = self.state.read().expect("lock poisoned");
        Ok(state.get(map).and_then(|entries| entries.get(key)).cloned())
    }

    async fn query_entries(
        &self,
        map: &str,
        prefix: &CompositeKey,
        pagination: &Pagination,
    ) -> LedgerResult<Vec<StorageEntry>> {
        self.check_online()?;
        let state = self.state.read().expect("lock poisoned");
        let Some(entries) = state.get(map) else {
            return Ok(Vec::new());
        };

        // The cursor is exclusive and may point anywhere; iteration starts
        // at whichever bound is later, then stops at the end of the
        // contiguous prefix range.
        let lower = match &pagination.start_key {
            Some(cursor) if cursor >= prefix => Bound::Excluded(cursor.clone()),
            _ => Bound::Included(prefix.clone()),
        };
        let limit = pagination
            .page_size
            .map(|n| n as usize)
            .unwrap_or(usize::MAX);

        let page = entries
            .range((lower, Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .take(limit)
            .map(|(key, value)| StorageEntry::new(key.clone(), value.clone()))
            .collect();
        Ok(page)
    }

    async fn query_multi(
        &self,
        map: &str,
        keys: &[CompositeKey],
    ) -> LedgerResult<Vec<Option<Value>>> {
        self.check_online()?;
        let state = self.state.read().expect("lock poisoned");
        let entries = state.get(map);
        Ok(keys
            .iter()
            .map(|key| entries.and_then(|e| e.get(key)).cloned())
            .collect())
    }

    async fn submit(&self, call: &TransactionCall) -> LedgerResult<SubmitReceipt> {
        self.check_online()?;
        let encoded =
            serde_json::to_vec(call).map_err(|e| LedgerError::Serialization(e.to_string()))?;
        let tx_hash = format!("0x{}", hex::encode(blake3::hash(&encoded).as_bytes()));
        tracing::debug!(extrinsic = %call.extrinsic, %tx_hash, "transaction recorded");
        self.submissions
            .write()
            .expect("lock poisoned")
            .push(call.clone());
        Ok(SubmitReceipt { tx_hash })
    }
}

impl std::fmt::Debug for InMemoryLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let maps = self.state.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryLedger").field("maps", &maps).finish()
    }
}
