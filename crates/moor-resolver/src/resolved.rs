use std::collections::BTreeMap;

use moor_refs::{MediaHint, StoreKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The resolved value of one attribute.
///
/// `Empty` and `Failed` are distinct on purpose: a caller must be able to
/// tell "declared off-chain but never populated" apart from "failed to
/// fetch" — and both apart from an attribute that was never declared at
/// all (absent from the partition entirely).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedValue {
    /// A public literal, copied verbatim from the ledger.
    Inline(String),
    /// Structured data fetched from an off-chain store.
    Structured(Value),
    /// An opaque byte sequence fetched from an off-chain store, with the
    /// media hint its reference declared.
    Bytes {
        data: Vec<u8>,
        media: Option<MediaHint>,
    },
    /// Declared off-chain, never populated. No store lookup was made.
    Empty,
    /// Resolution failed; the detail names the underlying error.
    Failed(String),
}

impl ResolvedValue {
    /// Returns `true` for the failure sentinel.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The structured value, if this resolved as structured data.
    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            Self::Structured(v) => Some(v),
            _ => None,
        }
    }

    /// The inline literal, if this was a public attribute.
    pub fn as_inline(&self) -> Option<&str> {
        match self {
            Self::Inline(s) => Some(s),
            _ => None,
        }
    }
}

/// A resolved attribute list, partitioned by where each value lived.
///
/// Keys are preserved in every partition, including for `Empty` and
/// `Failed` values, so a partially-resolved asset still shows its full
/// attribute shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAttributes {
    /// Inline literals stored verbatim on-chain.
    pub public: BTreeMap<String, ResolvedValue>,
    /// Values resolved from the content-addressed store.
    pub content: BTreeMap<String, ResolvedValue>,
    /// Values resolved from the confidential-document store.
    pub confidential: BTreeMap<String, ResolvedValue>,
}

impl ResolvedAttributes {
    /// File a value under the partition matching its origin.
    pub fn insert(&mut self, origin: StoreKind, key: String, value: ResolvedValue) {
        let partition = match origin {
            StoreKind::Inline => &mut self.public,
            StoreKind::Content => &mut self.content,
            StoreKind::Confidential => &mut self.confidential,
        };
        partition.insert(key, value);
    }

    /// Look an attribute up across all partitions.
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        self.public
            .get(key)
            .or_else(|| self.content.get(key))
            .or_else(|| self.confidential.get(key))
    }

    /// Total number of attributes across partitions.
    pub fn len(&self) -> usize {
        self.public.len() + self.content.len() + self.confidential.len()
    }

    /// Returns `true` if no attributes were resolved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any attribute carries the failure sentinel.
    pub fn has_failures(&self) -> bool {
        self.public
            .values()
            .chain(self.content.values())
            .chain(self.confidential.values())
            .any(ResolvedValue::is_failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_routes_by_origin() {
        let mut resolved = ResolvedAttributes::default();
        resolved.insert(
            StoreKind::Inline,
            "title".into(),
            ResolvedValue::Inline("Deed".into()),
        );
        resolved.insert(
            StoreKind::Content,
            "address".into(),
            ResolvedValue::Structured(json!({"city": "Test City"})),
        );
        resolved.insert(
            StoreKind::Confidential,
            "ssn".into(),
            ResolvedValue::Failed("store unavailable".into()),
        );

        assert_eq!(resolved.public.len(), 1);
        assert_eq!(resolved.content.len(), 1);
        assert_eq!(resolved.confidential.len(), 1);
        assert_eq!(resolved.len(), 3);
    }

    #[test]
    fn get_searches_all_partitions() {
        let mut resolved = ResolvedAttributes::default();
        resolved.insert(StoreKind::Content, "a".into(), ResolvedValue::Empty);
        assert_eq!(resolved.get("a"), Some(&ResolvedValue::Empty));
        assert_eq!(resolved.get("b"), None);
    }

    #[test]
    fn failure_detection() {
        let mut resolved = ResolvedAttributes::default();
        assert!(!resolved.has_failures());
        resolved.insert(
            StoreKind::Confidential,
            "ssn".into(),
            ResolvedValue::Failed("boom".into()),
        );
        assert!(resolved.has_failures());
    }

    #[test]
    fn empty_is_not_failed() {
        assert!(!ResolvedValue::Empty.is_failed());
        assert!(ResolvedValue::Failed("x".into()).is_failed());
    }
}
