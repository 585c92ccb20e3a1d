//! Multi-store attribute resolution for Moor.
//!
//! An asset's on-chain attribute list mixes inline literals with typed
//! references into off-chain stores. The [`MultiStoreResolver`] turns that
//! flat list into a partitioned, resolved structure. On the write path it
//! turns payloads into the encoded references that get anchored on-chain.
//!
//! # Failure policy
//!
//! The two directions are deliberately asymmetric:
//!
//! - **Read**: a resolution failure is recorded against its attribute key
//!   as a [`ResolvedValue::Failed`] sentinel and never aborts sibling
//!   attributes; callers must be able to render a partially-resolved
//!   asset.
//! - **Write**: any single store failure aborts the whole batch. An asset
//!   must never be anchored on-chain referencing a blob that failed to
//!   persist.

pub mod error;
pub mod resolved;
pub mod resolver;

pub use error::{ResolveError, ResolveResult};
pub use resolved::{ResolvedAttributes, ResolvedValue};
pub use resolver::MultiStoreResolver;
