use async_trait::async_trait;
use moor_refs::StoreKind;
use serde_json::{json, Value};

use crate::error::{StoreError, StoreResult};
use crate::payload::Payload;
use crate::traits::{BlobStore, ConfidentialTransport, ContentTransport, OwnedDocument};

/// Adapter over the content-addressed plaintext store.
///
/// Structured payloads are serialized to JSON bytes before storage;
/// `retrieve` parses them back. Byte payloads pass through untouched.
pub struct ContentStore<T> {
    transport: T,
}

impl<T: ContentTransport> ContentStore<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl<T: ContentTransport> BlobStore for ContentStore<T> {
    fn kind(&self) -> StoreKind {
        StoreKind::Content
    }

    async fn store(&self, payload: &Payload) -> StoreResult<String> {
        let bytes = match payload {
            Payload::Structured(value) => serde_json::to_vec(value)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
            Payload::Bytes { data, .. } => data.clone(),
        };
        self.transport.add(&bytes).await
    }

    async fn retrieve(&self, content_id: &str) -> StoreResult<Value> {
        let bytes = self.transport.cat(content_id).await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn retrieve_raw(&self, content_id: &str) -> StoreResult<Vec<u8>> {
        self.transport.cat(content_id).await
    }
}

/// Field marking a byte payload wrapped into a confidential document.
const BYTES_FIELD: &str = "hex";

/// Adapter over the confidential-document store.
///
/// The service stores structured documents only, so byte payloads are
/// wrapped into a hex-carrying envelope on the way in and unwrapped by
/// `retrieve_raw` on the way out.
pub struct ConfidentialStore<T> {
    transport: T,
    document_name: String,
}

impl<T: ConfidentialTransport> ConfidentialStore<T> {
    pub fn new(transport: T) -> Self {
        Self::with_document_name(transport, "moor-attribute")
    }

    /// Use a custom name for documents created by this adapter. The name
    /// is service-side bookkeeping; it never appears on-chain.
    pub fn with_document_name(transport: T, name: impl Into<String>) -> Self {
        Self {
            transport,
            document_name: name.into(),
        }
    }
}

#[async_trait]
impl<T: ConfidentialTransport> BlobStore for ConfidentialStore<T> {
    fn kind(&self) -> StoreKind {
        StoreKind::Confidential
    }

    async fn store(&self, payload: &Payload) -> StoreResult<String> {
        let body = match payload {
            Payload::Structured(value) => value.clone(),
            Payload::Bytes { data, media } => json!({
                BYTES_FIELD: hex::encode(data),
                "media": media.extension(),
            }),
        };
        let document = OwnedDocument {
            name: self.document_name.clone(),
            description: "anchored off-chain attribute payload".to_string(),
            payload: body,
        };
        self.transport.add_owned(&document).await
    }

    async fn retrieve(&self, content_id: &str) -> StoreResult<Value> {
        self.transport.view_owned(content_id).await
    }

    async fn retrieve_raw(&self, content_id: &str) -> StoreResult<Vec<u8>> {
        let value = self.transport.view_owned(content_id).await?;
        match value.get(BYTES_FIELD).and_then(Value::as_str) {
            Some(encoded) => {
                hex::decode(encoded).map_err(|e| StoreError::Serialization(e.to_string()))
            }
            // A structured document read through the raw variant: hand back
            // its JSON serialization.
            None => {
                serde_json::to_vec(&value).map_err(|e| StoreError::Serialization(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryConfidentialTransport, InMemoryContentTransport};
    use moor_refs::MediaHint;

    #[tokio::test]
    async fn content_store_structured_round_trip() {
        let store = ContentStore::new(InMemoryContentTransport::new());
        let payload = Payload::Structured(json!({"state": "Virginia"}));

        let cid = store.store(&payload).await.unwrap();
        let back = store.retrieve(&cid).await.unwrap();
        assert_eq!(back, json!({"state": "Virginia"}));
    }

    #[tokio::test]
    async fn content_store_bytes_round_trip() {
        let store = ContentStore::new(InMemoryContentTransport::new());
        let media = MediaHint::from_label("pdf").unwrap();
        let payload = Payload::bytes(vec![0x25, 0x50, 0x44, 0x46], media);

        let cid = store.store(&payload).await.unwrap();
        let back = store.retrieve_raw(&cid).await.unwrap();
        assert_eq!(back, vec![0x25, 0x50, 0x44, 0x46]);
    }

    #[tokio::test]
    async fn content_store_raw_bytes_do_not_parse_as_structured() {
        let store = ContentStore::new(InMemoryContentTransport::new());
        let media = MediaHint::from_label("bin").unwrap();
        let cid = store
            .store(&Payload::bytes(vec![0xff, 0xfe], media))
            .await
            .unwrap();

        let err = store.retrieve(&cid).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[tokio::test]
    async fn confidential_store_structured_round_trip() {
        let store = ConfidentialStore::new(InMemoryConfidentialTransport::new());
        let payload = Payload::Structured(json!({"ssn": "123456789"}));

        let cid = store.store(&payload).await.unwrap();
        let back = store.retrieve(&cid).await.unwrap();
        assert_eq!(back, json!({"ssn": "123456789"}));
    }

    #[tokio::test]
    async fn confidential_store_bytes_round_trip() {
        let store = ConfidentialStore::new(InMemoryConfidentialTransport::new());
        let media = MediaHint::from_label("png").unwrap();
        let payload = Payload::bytes(vec![0x89, 0x50, 0x4e, 0x47], media);

        let cid = store.store(&payload).await.unwrap();
        let back = store.retrieve_raw(&cid).await.unwrap();
        assert_eq!(back, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn adapters_report_their_kind() {
        let content = ContentStore::new(InMemoryContentTransport::new());
        let confidential = ConfidentialStore::new(InMemoryConfidentialTransport::new());
        assert_eq!(content.kind(), StoreKind::Content);
        assert_eq!(confidential.kind(), StoreKind::Confidential);
    }

    #[tokio::test]
    async fn unavailable_transport_propagates() {
        let transport = InMemoryContentTransport::new();
        transport.set_offline(true);
        let store = ContentStore::new(transport);

        let err = store
            .store(&Payload::Structured(json!(1)))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
