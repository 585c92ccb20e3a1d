use moor_refs::MediaHint;
use serde::Serialize;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// A payload headed for (or returned from) an off-chain store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Structured data, serialized as JSON when stored.
    Structured(Value),
    /// An opaque byte sequence with its declared media hint.
    Bytes { data: Vec<u8>, media: MediaHint },
}

impl Payload {
    /// Build a structured payload from any serializable value.
    pub fn structured<T: Serialize>(value: &T) -> StoreResult<Self> {
        let value =
            serde_json::to_value(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self::Structured(value))
    }

    /// Build a byte payload with its media hint.
    pub fn bytes(data: Vec<u8>, media: MediaHint) -> Self {
        Self::Bytes { data, media }
    }

    /// The media hint to embed in the on-chain reference for this payload.
    pub fn media_hint(&self) -> MediaHint {
        match self {
            Self::Structured(_) => MediaHint::structured(),
            Self::Bytes { media, .. } => media.clone(),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}
