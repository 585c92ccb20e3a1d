use async_trait::async_trait;
use moor_refs::StoreKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreResult;
use crate::payload::Payload;

/// Collaborator boundary for the content-addressed plaintext store.
///
/// Mirrors the service's native interface: add bytes, get bytes back by
/// content id. Implementations are stateless beyond their connection
/// handle and safe to share across concurrent calls.
#[async_trait]
pub trait ContentTransport: Send + Sync {
    /// Store raw bytes, returning their content id.
    async fn add(&self, bytes: &[u8]) -> StoreResult<String>;

    /// Fetch the bytes for a content id.
    async fn cat(&self, content_id: &str) -> StoreResult<Vec<u8>>;
}

#[async_trait]
impl<T: ContentTransport + ?Sized> ContentTransport for std::sync::Arc<T> {
    async fn add(&self, bytes: &[u8]) -> StoreResult<String> {
        (**self).add(bytes).await
    }

    async fn cat(&self, content_id: &str) -> StoreResult<Vec<u8>> {
        (**self).cat(content_id).await
    }
}

/// A document as accepted by the confidential-document service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedDocument {
    pub name: String,
    pub description: String,
    pub payload: Value,
}

/// Collaborator boundary for the confidential-document service.
///
/// Storage is gated by ownership on the service side; this boundary only
/// carries the calls through.
#[async_trait]
pub trait ConfidentialTransport: Send + Sync {
    /// Store an owned document, returning its content id.
    async fn add_owned(&self, document: &OwnedDocument) -> StoreResult<String>;

    /// Fetch the decrypted payload of an owned document by content id.
    async fn view_owned(&self, content_id: &str) -> StoreResult<Value>;
}

#[async_trait]
impl<T: ConfidentialTransport + ?Sized> ConfidentialTransport for std::sync::Arc<T> {
    async fn add_owned(&self, document: &OwnedDocument) -> StoreResult<String> {
        (**self).add_owned(document).await
    }

    async fn view_owned(&self, content_id: &str) -> StoreResult<Value> {
        (**self).view_owned(content_id).await
    }
}

/// Uniform capability over every backing store.
///
/// All implementations must satisfy these invariants:
/// - `store` returns a content id that `retrieve`/`retrieve_raw` accept.
/// - A media hint never changes where a payload lands; it only informs
///   the caller which retrieval variant to use.
/// - Failures are typed ([`crate::StoreError`]), never silently ignored.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Which store this adapter fronts. The resolver registers adapters
    /// by kind and routes decoded references accordingly.
    fn kind(&self) -> StoreKind;

    /// Persist a payload, returning its content id.
    async fn store(&self, payload: &Payload) -> StoreResult<String>;

    /// Retrieve a payload as structured data.
    async fn retrieve(&self, content_id: &str) -> StoreResult<Value>;

    /// Retrieve a payload as its raw byte sequence.
    async fn retrieve_raw(&self, content_id: &str) -> StoreResult<Vec<u8>>;
}
