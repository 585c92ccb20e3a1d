use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use moor_ledger::{maps, LedgerClient, Pagination, StorageEntry};
use moor_resolver::MultiStoreResolver;
use moor_types::{AttributeEntry, CollectionId, CompositeKey, InstanceId, KeyPart};
use serde_json::Value;

use crate::error::{GraphError, GraphResult};
use crate::records::{AssetCore, AssetRecord, CollectionRecord, Hierarchy};

/// Joins per-asset ledger records, metadata, attributes, and hierarchy
/// into denormalized views.
///
/// The join key is always the shared `[collection, instance]` composite
/// key prefix. Cross-map correlation goes through instance-id lookups,
/// never through result positions — except for `query_multi`, whose
/// output order is contractually the input key order.
pub struct AssetAssembler {
    ledger: Arc<dyn LedgerClient>,
    resolver: MultiStoreResolver,
}

impl AssetAssembler {
    pub fn new(ledger: Arc<dyn LedgerClient>, resolver: MultiStoreResolver) -> Self {
        Self { ledger, resolver }
    }

    /// Assemble a single asset.
    ///
    /// Missing metadata or hierarchy records mean "no metadata" / "not
    /// hierarchical", never an error; a missing core record is
    /// [`GraphError::AssetNotFound`].
    pub async fn asset(
        &self,
        collection: CollectionId,
        instance: InstanceId,
    ) -> GraphResult<AssetRecord> {
        let key: CompositeKey = (collection, instance).into();

        let core_value = self
            .ledger
            .query(maps::ASSET, &key)
            .await?
            .ok_or(GraphError::AssetNotFound {
                collection,
                instance,
            })?;
        let core = decode_record::<AssetCore>(maps::ASSET, &key, core_value)?;

        let metadata = self.ledger.query(maps::INSTANCE_METADATA, &key).await?;
        let hierarchy = self.hierarchy(&key).await?;

        self.finish(collection, instance, core, metadata, hierarchy)
            .await
    }

    /// Assemble every asset in a collection.
    pub async fn collection(&self, collection: CollectionId) -> GraphResult<CollectionRecord> {
        let prefix: CompositeKey = collection.into();
        let asset_entries = self
            .ledger
            .query_entries(maps::ASSET, &prefix, &Pagination::all())
            .await?;

        let metadata_by_instance = self
            .entries_by_instance(maps::INSTANCE_METADATA, &prefix)
            .await?;
        let mut hierarchy_by_instance = HashMap::new();
        for (instance, value) in self.entries_by_instance(maps::HIERARCHY, &prefix).await? {
            let key: CompositeKey = (collection, instance).into();
            let hierarchy = decode_record::<Hierarchy>(maps::HIERARCHY, &key, value)?;
            hierarchy_by_instance.insert(instance, hierarchy);
        }

        let mut parts = Vec::with_capacity(asset_entries.len());
        for entry in &asset_entries {
            let instance = instance_part(maps::ASSET, &entry.key, 1)?;
            let core = decode_record::<AssetCore>(maps::ASSET, &entry.key, entry.value.clone())?;
            parts.push((instance, core));
        }

        let assets = join_all(parts.into_iter().map(|(instance, core)| {
            let metadata = metadata_by_instance.get(&instance).cloned();
            let hierarchy = hierarchy_by_instance
                .get(&instance)
                .cloned()
                .unwrap_or_default();
            self.finish(collection, instance, core, metadata, hierarchy)
        }))
        .await
        .into_iter()
        .collect::<GraphResult<Vec<_>>>()?;

        Ok(CollectionRecord {
            collection,
            metadata: self.collection_metadata(collection).await?,
            assets,
        })
    }

    /// Assemble one page of a collection's assets.
    ///
    /// The cursor applies to the `asset` map iteration; metadata and
    /// hierarchy records for the page's instances are then fetched with
    /// batched lookups and zipped positionally.
    pub async fn collection_page(
        &self,
        collection: CollectionId,
        pagination: &Pagination,
    ) -> GraphResult<Vec<AssetRecord>> {
        let prefix: CompositeKey = collection.into();
        let asset_entries = self
            .ledger
            .query_entries(maps::ASSET, &prefix, pagination)
            .await?;

        let mut parts = Vec::with_capacity(asset_entries.len());
        for entry in &asset_entries {
            let instance = instance_part(maps::ASSET, &entry.key, 1)?;
            let core = decode_record::<AssetCore>(maps::ASSET, &entry.key, entry.value.clone())?;
            parts.push((instance, core));
        }

        let keys: Vec<CompositeKey> = parts
            .iter()
            .map(|(instance, _)| (collection, *instance).into())
            .collect();
        let metadata = self.ledger.query_multi(maps::INSTANCE_METADATA, &keys).await?;
        let hierarchies = self.ledger.query_multi(maps::HIERARCHY, &keys).await?;

        let mut pending = Vec::with_capacity(parts.len());
        for (index, (instance, core)) in parts.into_iter().enumerate() {
            let hierarchy = match hierarchies[index].clone() {
                Some(value) => decode_record::<Hierarchy>(maps::HIERARCHY, &keys[index], value)?,
                None => Hierarchy::default(),
            };
            pending.push((instance, core, metadata[index].clone(), hierarchy));
        }

        join_all(pending.into_iter().map(|(instance, core, meta, hierarchy)| {
            self.finish(collection, instance, core, meta, hierarchy)
        }))
        .await
        .into_iter()
        .collect()
    }

    /// Assemble only the hierarchy roots of a collection.
    ///
    /// Consults the roots index first, then fetches records for just
    /// those instance ids — the whole collection is never pulled.
    pub async fn roots(&self, collection: CollectionId) -> GraphResult<CollectionRecord> {
        let prefix: CompositeKey = collection.into();
        let root_entries = self
            .ledger
            .query_entries(maps::HIERARCHY_ROOTS, &prefix, &Pagination::all())
            .await?;
        let roots = root_entries
            .iter()
            .map(|entry| instance_part(maps::HIERARCHY_ROOTS, &entry.key, 1))
            .collect::<GraphResult<Vec<_>>>()?;

        let keys: Vec<CompositeKey> = roots
            .iter()
            .map(|instance| (collection, *instance).into())
            .collect();
        // Three batched lookups sharing one key list; each result vector
        // zips positionally against `roots`.
        let cores = self.ledger.query_multi(maps::ASSET, &keys).await?;
        let metadata = self.ledger.query_multi(maps::INSTANCE_METADATA, &keys).await?;
        let hierarchies = self.ledger.query_multi(maps::HIERARCHY, &keys).await?;

        let mut parts = Vec::with_capacity(roots.len());
        for (index, instance) in roots.iter().enumerate() {
            let Some(core_value) = cores[index].clone() else {
                tracing::warn!(%collection, %instance, "roots index references a missing asset");
                continue;
            };
            let key = &keys[index];
            let core = decode_record::<AssetCore>(maps::ASSET, key, core_value)?;
            let hierarchy = match hierarchies[index].clone() {
                Some(value) => decode_record::<Hierarchy>(maps::HIERARCHY, key, value)?,
                None => Hierarchy::default(),
            };
            parts.push((*instance, core, metadata[index].clone(), hierarchy));
        }

        let assets = join_all(parts.into_iter().map(|(instance, core, meta, hierarchy)| {
            self.finish(collection, instance, core, meta, hierarchy)
        }))
        .await
        .into_iter()
        .collect::<GraphResult<Vec<_>>>()?;

        Ok(CollectionRecord {
            collection,
            metadata: self.collection_metadata(collection).await?,
            assets,
        })
    }

    /// Collections in which an account holds assets, via the owner index.
    pub async fn collections_by_account(&self, account: &str) -> GraphResult<Vec<CollectionId>> {
        let prefix = CompositeKey::from_parts(vec![account.into()]);
        let entries = self
            .ledger
            .query_entries(maps::COLLECTION_ACCOUNT, &prefix, &Pagination::all())
            .await?;
        entries
            .iter()
            .map(|entry| {
                entry
                    .key
                    .part(1)
                    .and_then(KeyPart::as_id)
                    .map(CollectionId)
                    .ok_or_else(|| GraphError::MalformedRecord {
                        map: maps::COLLECTION_ACCOUNT.to_string(),
                        key: entry.key.to_string(),
                        reason: "key part 1 is not a collection id".to_string(),
                    })
            })
            .collect()
    }

    /// The asset's attribute list as stored on-chain, pre-resolution.
    pub async fn attribute_entries(
        &self,
        collection: CollectionId,
        instance: InstanceId,
    ) -> GraphResult<Vec<AttributeEntry>> {
        let prefix: CompositeKey = (collection, instance).into();
        let entries = self
            .ledger
            .query_entries(maps::ATTRIBUTE, &prefix, &Pagination::all())
            .await?;
        entries.iter().map(attribute_from_entry).collect()
    }

    async fn finish(
        &self,
        collection: CollectionId,
        instance: InstanceId,
        core: AssetCore,
        metadata: Option<Value>,
        hierarchy: Hierarchy,
    ) -> GraphResult<AssetRecord> {
        let entries = self.attribute_entries(collection, instance).await?;
        let attributes = self.resolver.resolve(&entries).await;
        Ok(AssetRecord {
            collection,
            instance,
            core,
            attributes,
            metadata,
            hierarchy,
        })
    }

    async fn hierarchy(&self, key: &CompositeKey) -> GraphResult<Hierarchy> {
        match self.ledger.query(maps::HIERARCHY, key).await? {
            Some(value) => decode_record::<Hierarchy>(maps::HIERARCHY, key, value),
            None => Ok(Hierarchy::default()),
        }
    }

    async fn collection_metadata(&self, collection: CollectionId) -> GraphResult<Option<Value>> {
        Ok(self
            .ledger
            .query(maps::COLLECTION_METADATA, &collection.into())
            .await?)
    }

    async fn entries_by_instance(
        &self,
        map: &str,
        prefix: &CompositeKey,
    ) -> GraphResult<HashMap<InstanceId, Value>> {
        let entries = self
            .ledger
            .query_entries(map, prefix, &Pagination::all())
            .await?;
        let mut by_instance = HashMap::with_capacity(entries.len());
        for entry in entries {
            let instance = instance_part(map, &entry.key, 1)?;
            by_instance.insert(instance, entry.value);
        }
        Ok(by_instance)
    }
}

fn decode_record<T: serde::de::DeserializeOwned>(
    map: &str,
    key: &CompositeKey,
    value: Value,
) -> GraphResult<T> {
    serde_json::from_value(value).map_err(|e| GraphError::MalformedRecord {
        map: map.to_string(),
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn instance_part(map: &str, key: &CompositeKey, index: usize) -> GraphResult<InstanceId> {
    key.part(index)
        .and_then(KeyPart::as_id)
        .map(InstanceId)
        .ok_or_else(|| GraphError::MalformedRecord {
            map: map.to_string(),
            key: key.to_string(),
            reason: format!("key part {index} is not a numeric id"),
        })
}

/// Normalize one `attribute` map entry: the label is the third key part,
/// the raw value is the first element of the stored `[value, deposit]`
/// tuple (bare strings are accepted for older encodings).
fn attribute_from_entry(entry: &StorageEntry) -> GraphResult<AttributeEntry> {
    let label = entry
        .key
        .part(2)
        .ok_or_else(|| GraphError::MalformedRecord {
            map: maps::ATTRIBUTE.to_string(),
            key: entry.key.to_string(),
            reason: "missing attribute label part".to_string(),
        })?
        .to_string();

    let raw = match &entry.value {
        Value::Array(parts) => parts
            .first()
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| GraphError::MalformedRecord {
                map: maps::ATTRIBUTE.to_string(),
                key: entry.key.to_string(),
                reason: "attribute tuple has no string value".to_string(),
            })?,
        Value::String(s) => s.clone(),
        other => {
            return Err(GraphError::MalformedRecord {
                map: maps::ATTRIBUTE.to_string(),
                key: entry.key.to_string(),
                reason: format!("unexpected attribute value shape: {other}"),
            })
        }
    };

    Ok(AttributeEntry::new(label, raw))
}
