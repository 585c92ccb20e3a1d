//! High-level SDK for Moor.
//!
//! Wires the ledger client, the off-chain store adapters, the multi-store
//! resolver, and the asset graph assembler into one facade: anchor an
//! asset with mixed on-chain/off-chain attributes, read it back as a
//! single denormalized record.
//!
//! This is the main entry point for applications embedding Moor.

pub mod client;
pub mod config;
pub mod error;

pub use client::{CreateAsset, Moor};
pub use config::{ConfidentialEndpoint, ContentEndpoint, MoorConfig};
pub use error::{SdkError, SdkResult};

// Re-export key types
pub use moor_graph::{AssetRecord, CollectionRecord, Hierarchy};
pub use moor_ledger::{LedgerClient, Pagination, SubmitReceipt};
pub use moor_refs::{MediaHint, StoreKind};
pub use moor_resolver::{MultiStoreResolver, ResolvedAttributes, ResolvedValue};
pub use moor_store::Payload;
pub use moor_types::{CollectionId, InstanceId};
