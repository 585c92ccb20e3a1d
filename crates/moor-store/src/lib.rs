//! Off-chain blob storage for Moor.
//!
//! Attribute payloads too large or too sensitive for the ledger live in
//! one of two backing stores: a content-addressed plaintext store and an
//! access-controlled confidential-document store. This crate provides the
//! uniform [`BlobStore`] capability over both, so the resolver can
//! dispatch on store kind without knowing either service's native shape.
//!
//! # Layering
//!
//! - [`ContentTransport`] / [`ConfidentialTransport`] — thin collaborator
//!   boundaries mirroring each service's native interface. Real network
//!   clients live outside this repository; the in-memory implementations
//!   here serve tests and embedding.
//! - [`ContentStore`] / [`ConfidentialStore`] — adapters turning a
//!   transport into the uniform `store`/`retrieve`/`retrieve_raw`
//!   capability.
//!
//! No adapter dispatches on media type. Choosing the structured or raw
//! retrieval variant is the resolver's job.

pub mod adapters;
pub mod error;
pub mod memory;
pub mod payload;
pub mod traits;

pub use adapters::{ConfidentialStore, ContentStore};
pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryConfidentialTransport, InMemoryContentTransport};
pub use payload::Payload;
pub use traits::{BlobStore, ConfidentialTransport, ContentTransport, OwnedDocument};
