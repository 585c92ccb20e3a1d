use moor_resolver::ResolvedAttributes;
use moor_types::{CollectionId, InstanceId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Core fields of the on-chain asset record.
///
/// Deserialized leniently: ledger encodings vary in which fields they
/// populate, and a missing field is "not set", not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetCore {
    /// Account owning the asset.
    pub owner: Option<String>,
    /// Whether transfers are frozen.
    #[serde(alias = "isFrozen")]
    pub frozen: bool,
    /// Account approved to transfer on the owner's behalf, if any.
    pub approved: Option<String>,
}

/// Parent/children/weight hierarchy of one asset.
///
/// The default value means "not hierarchical": no parent, no children, no
/// weighted share. An asset without a hierarchy record gets exactly this.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hierarchy {
    pub parent: Option<InstanceId>,
    pub children: Vec<InstanceId>,
    /// Weighted share of the parent, in parts per mille.
    pub weight: Option<u64>,
}

impl Hierarchy {
    /// Returns `true` if this asset has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// One asset, denormalized across every storage map that describes it.
///
/// Constructed fresh on every read call, never mutated after assembly,
/// owned exclusively by the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub collection: CollectionId,
    pub instance: InstanceId,
    pub core: AssetCore,
    pub attributes: ResolvedAttributes,
    /// Per-instance descriptive metadata, if any was set.
    pub metadata: Option<Value>,
    pub hierarchy: Hierarchy,
}

/// A collection and the assets assembled for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub collection: CollectionId,
    /// Collection-level descriptive metadata, if any was set.
    pub metadata: Option<Value>,
    pub assets: Vec<AssetRecord>,
}
