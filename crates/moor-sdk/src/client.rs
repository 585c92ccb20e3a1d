use std::sync::Arc;

use moor_graph::{AssetAssembler, AssetRecord, CollectionRecord};
use moor_ledger::{maps, LedgerClient, Pagination, SubmitReceipt, TransactionCall};
use moor_refs::StoreKind;
use moor_resolver::MultiStoreResolver;
use moor_store::Payload;
use moor_types::{CollectionId, CompositeKey, InstanceId, KeyPart};
use serde_json::json;

use crate::error::{SdkError, SdkResult};

/// Extrinsic anchoring a new asset with its attribute set.
const CREATE_EXTRINSIC: &str = "createWithAttributes";

/// Request to anchor a new asset.
///
/// Attributes land in three places: `public_attributes` go on-chain
/// verbatim, `content_payloads` are stored plaintext in the
/// content-addressed store, `confidential_payloads` go to the
/// confidential-document service. The resulting references all end up in
/// the asset's single on-chain attribute set.
#[derive(Clone, Debug, Default)]
pub struct CreateAsset {
    /// Target collection; the newest existing collection when omitted.
    pub collection: Option<CollectionId>,
    /// Instance id; 0 when omitted.
    pub instance: Option<InstanceId>,
    /// Admin account for the new asset, also used as the signer.
    pub admin: String,
    /// Weighted share when minting under a parent.
    pub weight: Option<u64>,
    pub public_attributes: Vec<(String, String)>,
    pub content_payloads: Vec<(String, Payload)>,
    pub confidential_payloads: Vec<(String, Payload)>,
}

/// High-level Moor client: one facade over the ledger, the off-chain
/// stores, and the assembly pipeline.
pub struct Moor {
    ledger: Arc<dyn LedgerClient>,
    resolver: MultiStoreResolver,
    assembler: AssetAssembler,
}

impl Moor {
    /// Compose a client from a ledger boundary and a resolver carrying
    /// the store adapters.
    pub fn new(ledger: Arc<dyn LedgerClient>, resolver: MultiStoreResolver) -> Self {
        let assembler = AssetAssembler::new(Arc::clone(&ledger), resolver.clone());
        Self {
            ledger,
            resolver,
            assembler,
        }
    }

    // ---- Write path ----

    /// Anchor a new asset.
    ///
    /// Off-chain payloads are persisted first; any store failure aborts
    /// the whole call before anything reaches the ledger, so a submitted
    /// asset never references a blob that failed to persist.
    pub async fn create_asset(&self, request: CreateAsset) -> SdkResult<SubmitReceipt> {
        let collection = match request.collection {
            Some(collection) => collection,
            None => self
                .last_collection_id()
                .await?
                .ok_or(SdkError::NoCollections)?,
        };
        let instance = request.instance.unwrap_or(InstanceId(0));

        let mut attributes = request.public_attributes.clone();
        if !request.content_payloads.is_empty() {
            let encoded = self
                .resolver
                .encode_batch(StoreKind::Content, &request.content_payloads)
                .await?;
            attributes.extend(encoded);
        }
        if !request.confidential_payloads.is_empty() {
            let encoded = self
                .resolver
                .encode_batch(StoreKind::Confidential, &request.confidential_payloads)
                .await?;
            attributes.extend(encoded);
        }

        let attribute_params: Vec<_> = attributes
            .iter()
            .map(|(key, value)| json!([key, value]))
            .collect();
        let call = TransactionCall::new(
            CREATE_EXTRINSIC,
            request.admin.clone(),
            vec![
                json!(collection),
                json!(instance),
                json!(request.weight),
                json!(request.admin),
                json!(attribute_params),
            ],
        );

        tracing::info!(
            %collection,
            %instance,
            attributes = attributes.len(),
            "anchoring asset"
        );
        Ok(self.ledger.submit(&call).await?)
    }

    // ---- Read path ----

    /// One asset, fully assembled and resolved.
    pub async fn asset(
        &self,
        collection: CollectionId,
        instance: InstanceId,
    ) -> SdkResult<AssetRecord> {
        Ok(self.assembler.asset(collection, instance).await?)
    }

    /// Every asset in a collection.
    pub async fn collection(&self, collection: CollectionId) -> SdkResult<CollectionRecord> {
        Ok(self.assembler.collection(collection).await?)
    }

    /// One page of a collection's assets, resuming at the caller's cursor.
    pub async fn collection_assets(
        &self,
        collection: CollectionId,
        pagination: &Pagination,
    ) -> SdkResult<Vec<AssetRecord>> {
        Ok(self.assembler.collection_page(collection, pagination).await?)
    }

    /// Only the hierarchy roots of a collection.
    pub async fn collection_roots(
        &self,
        collection: CollectionId,
    ) -> SdkResult<CollectionRecord> {
        Ok(self.assembler.roots(collection).await?)
    }

    /// Collections in which an account holds assets.
    pub async fn collections_by_account(&self, account: &str) -> SdkResult<Vec<CollectionId>> {
        Ok(self.assembler.collections_by_account(account).await?)
    }

    /// The highest existing collection id, or `None` on an empty ledger.
    pub async fn last_collection_id(&self) -> SdkResult<Option<CollectionId>> {
        let entries = self
            .ledger
            .query_entries(maps::COLLECTION, &CompositeKey::root(), &Pagination::all())
            .await?;
        Ok(entries
            .iter()
            .filter_map(|entry| entry.key.part(0).and_then(KeyPart::as_id))
            .max()
            .map(CollectionId))
    }
}
