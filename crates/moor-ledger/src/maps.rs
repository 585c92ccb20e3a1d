//! Storage map names read and joined by this system.
//!
//! Composite keys from different maps share positional prefixes (e.g.
//! `asset[collection, instance]` and `attribute[collection, instance,
//! label]`); that shared prefix is the join key used downstream.

/// Collection details, keyed `[collection]`.
pub const COLLECTION: &str = "class";

/// Collection-level descriptive metadata, keyed `[collection]`.
pub const COLLECTION_METADATA: &str = "classMetadataOf";

/// Owner index, keyed `[account, collection]`.
pub const COLLECTION_ACCOUNT: &str = "classAccount";

/// Core asset record (owner, frozen flag, approval), keyed
/// `[collection, instance]`.
pub const ASSET: &str = "asset";

/// Per-instance descriptive metadata, keyed `[collection, instance]`.
pub const INSTANCE_METADATA: &str = "instanceMetadataOf";

/// Attribute values, keyed `[collection, instance, label]`. The stored
/// value is a `[value, deposit]` tuple.
pub const ATTRIBUTE: &str = "attribute";

/// Hierarchy record (parent, children, weight), keyed
/// `[collection, instance]`.
pub const HIERARCHY: &str = "fruniqueInfo";

/// Per-collection index of hierarchy roots, keyed
/// `[collection, instance]`.
pub const HIERARCHY_ROOTS: &str = "fruniqueRoots";
