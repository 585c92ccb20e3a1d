//! Asset graph assembly for Moor.
//!
//! Asset state is spread across independent ledger storage maps sharing a
//! `[collection, instance]` key prefix: the core record, descriptive
//! metadata, the attribute list, and the parent/children/weight hierarchy.
//! The [`AssetAssembler`] joins them into one denormalized [`AssetRecord`]
//! per asset, resolving off-chain attributes through the multi-store
//! resolver along the way.
//!
//! Records are constructed fresh on every call and owned exclusively by
//! the caller; the assembler caches nothing.

pub mod assembler;
pub mod error;
pub mod records;

pub use assembler::AssetAssembler;
pub use error::{GraphError, GraphResult};
pub use records::{AssetCore, AssetRecord, CollectionRecord, Hierarchy};
