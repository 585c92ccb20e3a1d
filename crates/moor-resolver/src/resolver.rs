use std::sync::Arc;

use futures::future::join_all;
use moor_refs::{RefError, StoreKind, TypedRef};
use moor_store::{BlobStore, Payload};
use moor_types::AttributeEntry;

use crate::error::{ResolveError, ResolveResult};
use crate::resolved::{ResolvedAttributes, ResolvedValue};

/// Classifies and resolves flat attribute lists against the registered
/// store adapters.
///
/// Adapters are stateless beyond their connection handle; the resolver
/// holds them behind `Arc` and is itself cheap to clone and safe to share
/// across concurrent calls.
#[derive(Clone, Default)]
pub struct MultiStoreResolver {
    adapters: Vec<Arc<dyn BlobStore>>,
}

impl MultiStoreResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter, keyed by its reported [`StoreKind`].
    /// Builder-style; later registrations for the same kind win.
    pub fn with_adapter(mut self, adapter: Arc<dyn BlobStore>) -> Self {
        self.adapters.insert(0, adapter);
        self
    }

    fn adapter_for(&self, kind: StoreKind) -> Option<&Arc<dyn BlobStore>> {
        self.adapters.iter().find(|a| a.kind() == kind)
    }

    /// Read path: resolve every attribute concurrently and merge the
    /// results by key into partitioned form.
    ///
    /// Never fails as a whole. One unresolvable attribute becomes a
    /// [`ResolvedValue::Failed`] sentinel under its key; its siblings
    /// resolve normally. The call returns only after every in-flight
    /// resolution has settled.
    pub async fn resolve(&self, entries: &[AttributeEntry]) -> ResolvedAttributes {
        let results = join_all(entries.iter().map(|entry| self.resolve_one(entry))).await;

        let mut resolved = ResolvedAttributes::default();
        for (entry, (origin, value)) in entries.iter().zip(results) {
            resolved.insert(origin, entry.key.clone(), value);
        }
        resolved
    }

    async fn resolve_one(&self, entry: &AttributeEntry) -> (StoreKind, ResolvedValue) {
        let reference = match moor_refs::decode(&entry.raw) {
            Ok(None) => {
                return (
                    StoreKind::Inline,
                    ResolvedValue::Inline(entry.raw.clone()),
                )
            }
            Ok(Some(reference)) => reference,
            // A recognized prefix with a malformed body: surfaced under
            // the recognized store's partition, never reclassified as a
            // literal.
            Err(err @ RefError::MalformedReference { kind, .. }) => {
                tracing::warn!(key = %entry.key, %err, "malformed typed reference");
                return (kind, ResolvedValue::Failed(err.to_string()));
            }
            Err(err) => {
                tracing::warn!(key = %entry.key, %err, "undecodable typed reference");
                return (StoreKind::Inline, ResolvedValue::Failed(err.to_string()));
            }
        };

        if reference.is_unpopulated() {
            return (reference.kind, ResolvedValue::Empty);
        }

        let Some(adapter) = self.adapter_for(reference.kind) else {
            return (
                reference.kind,
                ResolvedValue::Failed(format!(
                    "no adapter registered for {} store",
                    reference.kind
                )),
            );
        };

        let value = Self::fetch(adapter, &reference).await;
        if let ResolvedValue::Failed(detail) = &value {
            tracing::warn!(key = %entry.key, kind = %reference.kind, %detail, "attribute resolution failed");
        }
        (reference.kind, value)
    }

    /// Dispatch on the media hint: the structured variant for structured
    /// (or unhinted) references, the raw variant otherwise.
    async fn fetch(adapter: &Arc<dyn BlobStore>, reference: &TypedRef) -> ResolvedValue {
        let structured = reference
            .media
            .as_ref()
            .map(|hint| hint.is_structured())
            .unwrap_or(true);

        if structured {
            match adapter.retrieve(&reference.content_id).await {
                Ok(value) => ResolvedValue::Structured(value),
                Err(err) => ResolvedValue::Failed(err.to_string()),
            }
        } else {
            match adapter.retrieve_raw(&reference.content_id).await {
                Ok(data) => ResolvedValue::Bytes {
                    data,
                    media: reference.media.clone(),
                },
                Err(err) => ResolvedValue::Failed(err.to_string()),
            }
        }
    }

    /// Write path: persist every payload to the target store concurrently
    /// and encode the resulting content ids as on-chain references.
    ///
    /// Atomic: any single store failure aborts the whole batch and
    /// surfaces the underlying adapter error with the failing key. On
    /// success the output pairs are in input order.
    pub async fn encode_batch(
        &self,
        kind: StoreKind,
        payloads: &[(String, Payload)],
    ) -> ResolveResult<Vec<(String, String)>> {
        let adapter = self
            .adapter_for(kind)
            .ok_or(ResolveError::NoAdapter(kind))?;

        let stores = payloads.iter().map(|(key, payload)| async move {
            let content_id =
                adapter
                    .store(payload)
                    .await
                    .map_err(|source| ResolveError::Store {
                        key: key.clone(),
                        source,
                    })?;
            let raw = moor_refs::encode(kind, &content_id, Some(&payload.media_hint()))
                .map_err(ResolveError::Encode)?;
            Ok::<(String, String), ResolveError>((key.clone(), raw))
        });

        join_all(stores).await.into_iter().collect()
    }
}

impl std::fmt::Debug for MultiStoreResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds: Vec<StoreKind> = self.adapters.iter().map(|a| a.kind()).collect();
        f.debug_struct("MultiStoreResolver")
            .field("adapters", &kinds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moor_refs::MediaHint;
    use moor_store::{
        ConfidentialStore, ContentStore, InMemoryConfidentialTransport, InMemoryContentTransport,
    };
    use serde_json::json;

    struct Fixture {
        resolver: MultiStoreResolver,
        content: Arc<ContentStore<Arc<InMemoryContentTransport>>>,
        confidential: Arc<ConfidentialStore<Arc<InMemoryConfidentialTransport>>>,
        content_transport: Arc<InMemoryContentTransport>,
        confidential_transport: Arc<InMemoryConfidentialTransport>,
    }

    fn fixture() -> Fixture {
        let content_transport = Arc::new(InMemoryContentTransport::new());
        let confidential_transport = Arc::new(InMemoryConfidentialTransport::new());
        let content = Arc::new(ContentStore::new(Arc::clone(&content_transport)));
        let confidential = Arc::new(ConfidentialStore::new(Arc::clone(&confidential_transport)));
        let resolver = MultiStoreResolver::new()
            .with_adapter(content.clone() as Arc<dyn BlobStore>)
            .with_adapter(confidential.clone() as Arc<dyn BlobStore>);
        Fixture {
            resolver,
            content,
            confidential,
            content_transport,
            confidential_transport,
        }
    }

    #[tokio::test]
    async fn mixed_list_partitions_by_origin() {
        let fx = fixture();
        let address = json!({"street": "1 Test Road", "city": "Test City"});
        let cid = fx
            .content
            .store(&Payload::Structured(address.clone()))
            .await
            .unwrap();
        let entries = vec![
            AttributeEntry::new("title", "Deed"),
            AttributeEntry::new("value", "10000"),
            AttributeEntry::new("address", format!("IPFS:{cid}:json")),
        ];

        let resolved = fx.resolver.resolve(&entries).await;
        assert_eq!(
            resolved.public.get("title"),
            Some(&ResolvedValue::Inline("Deed".into()))
        );
        assert_eq!(
            resolved.public.get("value"),
            Some(&ResolvedValue::Inline("10000".into()))
        );
        assert_eq!(
            resolved.content.get("address"),
            Some(&ResolvedValue::Structured(address))
        );
        assert!(!resolved.has_failures());
    }

    #[tokio::test]
    async fn unreachable_store_fails_only_its_attribute() {
        let fx = fixture();
        let ssn = json!({"ssn": "123456789"});
        let cid = fx
            .confidential
            .store(&Payload::Structured(ssn))
            .await
            .unwrap();
        fx.confidential_transport.set_offline(true);

        let entries = vec![
            AttributeEntry::new("title", "Deed"),
            AttributeEntry::new("owner_ssn", format!("HCD:{cid}:json")),
        ];
        let resolved = fx.resolver.resolve(&entries).await;

        assert_eq!(
            resolved.public.get("title"),
            Some(&ResolvedValue::Inline("Deed".into()))
        );
        assert!(resolved
            .confidential
            .get("owner_ssn")
            .is_some_and(ResolvedValue::is_failed));
        assert!(resolved.has_failures());
    }

    #[tokio::test]
    async fn unpopulated_reference_skips_the_store() {
        let fx = fixture();
        // No lookup must happen: an offline store would otherwise fail it.
        fx.content_transport.set_offline(true);

        let entries = vec![AttributeEntry::new("scan", "IPFS:undefined")];
        let resolved = fx.resolver.resolve(&entries).await;
        assert_eq!(resolved.content.get("scan"), Some(&ResolvedValue::Empty));
        assert!(!resolved.has_failures());
    }

    #[tokio::test]
    async fn malformed_recognized_reference_is_failed_not_inline() {
        let fx = fixture();
        let entries = vec![AttributeEntry::new("bad", "IPFS:a:json:extra")];
        let resolved = fx.resolver.resolve(&entries).await;

        assert!(resolved.public.is_empty());
        assert!(resolved
            .content
            .get("bad")
            .is_some_and(ResolvedValue::is_failed));
    }

    #[tokio::test]
    async fn missing_adapter_is_per_attribute_failure() {
        let resolver = MultiStoreResolver::new();
        let entries = vec![
            AttributeEntry::new("title", "Deed"),
            AttributeEntry::new("doc", "HCD:cid77:json"),
        ];
        let resolved = resolver.resolve(&entries).await;
        assert_eq!(
            resolved.public.get("title"),
            Some(&ResolvedValue::Inline("Deed".into()))
        );
        assert!(resolved
            .confidential
            .get("doc")
            .is_some_and(ResolvedValue::is_failed));
    }

    #[tokio::test]
    async fn byte_references_resolve_raw_with_media() {
        let fx = fixture();
        let media = MediaHint::from_label("pdf").unwrap();
        let cid = fx
            .content
            .store(&Payload::bytes(vec![0x25, 0x50], media.clone()))
            .await
            .unwrap();

        let entries = vec![AttributeEntry::new("scan", format!("IPFS:{cid}:pdf"))];
        let resolved = fx.resolver.resolve(&entries).await;
        assert_eq!(
            resolved.content.get("scan"),
            Some(&ResolvedValue::Bytes {
                data: vec![0x25, 0x50],
                media: Some(media),
            })
        );
    }

    #[tokio::test]
    async fn encode_batch_produces_ordered_references() {
        let fx = fixture();
        let payloads = vec![
            (
                "address".to_string(),
                Payload::Structured(json!({"city": "Test City"})),
            ),
            (
                "scan".to_string(),
                Payload::bytes(vec![1, 2, 3], MediaHint::from_label("pdf").unwrap()),
            ),
        ];

        let encoded = fx
            .resolver
            .encode_batch(StoreKind::Content, &payloads)
            .await
            .unwrap();
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0].0, "address");
        assert!(encoded[0].1.starts_with("IPFS:"));
        assert!(encoded[0].1.ends_with(":json"));
        assert_eq!(encoded[1].0, "scan");
        assert!(encoded[1].1.ends_with(":pdf"));

        // Round trip: what we encoded resolves back.
        let entries: Vec<AttributeEntry> = encoded
            .into_iter()
            .map(|(key, raw)| AttributeEntry::new(key, raw))
            .collect();
        let resolved = fx.resolver.resolve(&entries).await;
        assert_eq!(
            resolved.content.get("address"),
            Some(&ResolvedValue::Structured(json!({"city": "Test City"})))
        );
    }

    #[tokio::test]
    async fn encode_batch_aborts_on_any_store_failure() {
        let fx = fixture();
        fx.content_transport.set_offline(true);

        let payloads = vec![
            ("a".to_string(), Payload::Structured(json!(1))),
            ("b".to_string(), Payload::Structured(json!(2))),
        ];
        let err = fx
            .resolver
            .encode_batch(StoreKind::Content, &payloads)
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Store { .. }));
    }

    #[tokio::test]
    async fn encode_batch_without_adapter_fails_upfront() {
        let resolver = MultiStoreResolver::new();
        let err = resolver
            .encode_batch(StoreKind::Confidential, &[])
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::NoAdapter(StoreKind::Confidential));
    }
}
