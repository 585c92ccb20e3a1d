//! Typed off-chain references for Moor.
//!
//! An asset attribute stored on the ledger is either a literal value or a
//! typed reference into an off-chain store, serialized as
//! `"<PREFIX><contentId>[:<extension>]"`. This crate owns that grammar:
//! encoding a store-routing decision into a single on-chain string, and
//! reversing it on read.
//!
//! The wire forms are the only bit-exact format Moor must reproduce
//! faithfully: any other implementation must remain able to decode
//! attributes written by this one.
//!
//! - `IPFS:bafy123:json` — content-addressed plaintext store
//! - `HCD:cid77:pdf` — confidential-document store
//! - anything else — inline literal, passed through unchanged

pub mod codec;
pub mod error;
pub mod media;

pub use codec::{decode, encode, StoreKind, TypedRef};
pub use error::{RefError, RefResult};
pub use media::MediaHint;
