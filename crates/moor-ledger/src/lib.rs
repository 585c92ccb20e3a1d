//! Ledger access for Moor.
//!
//! The ledger stores asset state across several independent storage maps,
//! each keyed by an ordered tuple of key components. This crate provides:
//!
//! - [`LedgerClient`] — the async query/submit boundary the rest of Moor
//!   programs against. Real RPC clients live outside this repository.
//! - [`StorageEntry`] / [`Pagination`] — normalized entry records and the
//!   pagination cursor passed through to the backend.
//! - [`maps`] — the storage map names this system reads and joins.
//! - [`InMemoryLedger`] — a `BTreeMap`-backed implementation for tests,
//!   local demos, and embedding.
//!
//! The client normalizes pages; it never re-implements pagination, and it
//! performs no joining. Correlating entries across maps that share a key
//! prefix is the asset graph assembler's job.

pub mod entries;
pub mod error;
pub mod maps;
pub mod memory;
pub mod traits;

pub use entries::{Pagination, StorageEntry, SubmitReceipt, TransactionCall};
pub use error::{LedgerError, LedgerResult};
pub use memory::InMemoryLedger;
pub use traits::LedgerClient;
