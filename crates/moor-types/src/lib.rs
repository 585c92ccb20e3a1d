//! Foundation types for Moor.
//!
//! Moor anchors structured asset records to a distributed ledger while
//! keeping large or sensitive payloads in off-chain stores. This crate
//! provides the types every other Moor crate builds on.
//!
//! # Key Types
//!
//! - [`CollectionId`] / [`InstanceId`] — identity of an asset within the
//!   ledger's collection/instance namespace
//! - [`KeyPart`] / [`CompositeKey`] — positional composite storage keys,
//!   the join key across independent ledger storage maps
//! - [`AttributeEntry`] — an on-chain attribute as read from the ledger,
//!   before off-chain resolution

pub mod attribute;
pub mod error;
pub mod id;
pub mod key;

pub use attribute::AttributeEntry;
pub use error::TypeError;
pub use id::{CollectionId, InstanceId};
pub use key::{CompositeKey, KeyPart};
