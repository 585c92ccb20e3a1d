use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::traits::{ConfidentialTransport, ContentTransport, OwnedDocument};

fn derive_content_id(prefix: &str, bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes);
    format!("{prefix}{}", hex::encode(&hash.as_bytes()[..16]))
}

/// In-memory content-addressed transport for tests and embedding.
///
/// Content ids are BLAKE3-derived, so storing the same bytes twice is
/// idempotent. `set_offline` simulates a connectivity failure for
/// partial-resolution tests.
pub struct InMemoryContentTransport {
    objects: RwLock<HashMap<String, Vec<u8>>>,
    offline: AtomicBool,
}

impl InMemoryContentTransport {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the backing service being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "content store offline (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryContentTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentTransport for InMemoryContentTransport {
    async fn add(&self, bytes: &[u8]) -> StoreResult<String> {
        self.check_online()?;
        if bytes.is_empty() {
            return Err(StoreError::Rejected("empty payload".to_string()));
        }
        let cid = derive_content_id("baf", bytes);
        let mut map = self.objects.write().expect("lock poisoned");
        map.entry(cid.clone()).or_insert_with(|| bytes.to_vec());
        Ok(cid)
    }

    async fn cat(&self, content_id: &str) -> StoreResult<Vec<u8>> {
        self.check_online()?;
        let map = self.objects.read().expect("lock poisoned");
        map.get(content_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(content_id.to_string()))
    }
}

impl std::fmt::Debug for InMemoryContentTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryContentTransport")
            .field("object_count", &self.len())
            .finish()
    }
}

/// In-memory confidential-document transport for tests and embedding.
///
/// Documents are keyed by a payload-derived content id. Ownership and
/// encryption belong to the real service; this backend only models the
/// store/view interface.
pub struct InMemoryConfidentialTransport {
    documents: RwLock<HashMap<String, OwnedDocument>>,
    offline: AtomicBool,
}

impl InMemoryConfidentialTransport {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate the backing service being unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "confidential store offline (simulated)".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryConfidentialTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfidentialTransport for InMemoryConfidentialTransport {
    async fn add_owned(&self, document: &OwnedDocument) -> StoreResult<String> {
        self.check_online()?;
        let body = serde_json::to_vec(&document.payload)
            .map_err(|e| StoreError::Rejected(e.to_string()))?;
        let cid = derive_content_id("doc", &body);
        let mut map = self.documents.write().expect("lock poisoned");
        map.entry(cid.clone()).or_insert_with(|| document.clone());
        Ok(cid)
    }

    async fn view_owned(&self, content_id: &str) -> StoreResult<Value> {
        self.check_online()?;
        let map = self.documents.read().expect("lock poisoned");
        map.get(content_id)
            .map(|doc| doc.payload.clone())
            .ok_or_else(|| StoreError::NotFound(content_id.to_string()))
    }
}

impl std::fmt::Debug for InMemoryConfidentialTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryConfidentialTransport")
            .field("document_count", &self.len())
            .finish()
    }
}
