use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{CollectionId, InstanceId};

/// A single positional component of a composite storage key.
///
/// Ledger storage maps are keyed by ordered tuples mixing numeric ids
/// (collection, instance) and text components (attribute labels, account
/// addresses). Ordering between parts is positional and significant: it is
/// what correlates entries from different maps that share a key prefix.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// A numeric component (collection id, instance id).
    Id(u64),
    /// A text component (attribute label, account address).
    Text(String),
}

impl KeyPart {
    /// The numeric value, if this part is numeric.
    pub fn as_id(&self) -> Option<u64> {
        match self {
            Self::Id(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    /// The text value, if this part is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for KeyPart {
    fn from(v: u64) -> Self {
        Self::Id(v)
    }
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<CollectionId> for KeyPart {
    fn from(id: CollectionId) -> Self {
        Self::Id(id.0)
    }
}

impl From<InstanceId> for KeyPart {
    fn from(id: InstanceId) -> Self {
        Self::Id(id.0)
    }
}

/// An ordered tuple of [`KeyPart`]s identifying a ledger storage entry.
///
/// Composite keys compare lexicographically part-by-part, so every key
/// sharing a prefix forms a contiguous range under `Ord`. In-memory and
/// remote backends both rely on this for prefix iteration.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CompositeKey(Vec<KeyPart>);

impl CompositeKey {
    /// The empty key — the prefix of every key.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a key from parts.
    pub fn from_parts(parts: impl IntoIterator<Item = KeyPart>) -> Self {
        Self(parts.into_iter().collect())
    }

    /// All parts, in positional order.
    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// The part at position `index`.
    pub fn part(&self, index: usize) -> Option<&KeyPart> {
        self.0.get(index)
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the key has no parts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `prefix` matches the leading parts of this key.
    pub fn starts_with(&self, prefix: &CompositeKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Extend this key by one part, producing a longer key.
    pub fn child(&self, part: impl Into<KeyPart>) -> Self {
        let mut parts = self.0.clone();
        parts.push(part.into());
        Self(parts)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for part in &self.0 {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{part}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<Vec<KeyPart>> for CompositeKey {
    fn from(parts: Vec<KeyPart>) -> Self {
        Self(parts)
    }
}

impl From<CollectionId> for CompositeKey {
    fn from(collection: CollectionId) -> Self {
        Self(vec![collection.into()])
    }
}

impl From<(CollectionId, InstanceId)> for CompositeKey {
    fn from((collection, instance): (CollectionId, InstanceId)) -> Self {
        Self(vec![collection.into(), instance.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(parts: Vec<KeyPart>) -> CompositeKey {
        CompositeKey::from_parts(parts)
    }

    #[test]
    fn starts_with_prefix() {
        let attr = key(vec![1u64.into(), 0u64.into(), "State".into()]);
        let asset = key(vec![1u64.into(), 0u64.into()]);
        let other = key(vec![2u64.into()]);

        assert!(attr.starts_with(&asset));
        assert!(attr.starts_with(&CompositeKey::root()));
        assert!(!attr.starts_with(&other));
        assert!(!asset.starts_with(&attr));
    }

    #[test]
    fn prefix_range_is_contiguous_under_ord() {
        let prefix = key(vec![5u64.into()]);
        let inside_a = key(vec![5u64.into(), 0u64.into()]);
        let inside_b = key(vec![5u64.into(), 9u64.into(), "z".into()]);
        let before = key(vec![4u64.into(), 100u64.into()]);
        let after = key(vec![6u64.into()]);

        assert!(before < prefix);
        assert!(prefix <= inside_a);
        assert!(inside_a < inside_b);
        assert!(inside_b < after);
    }

    #[test]
    fn child_extends() {
        let base: CompositeKey = (CollectionId(1), InstanceId(2)).into();
        let attr = base.child("title");
        assert_eq!(attr.len(), 3);
        assert_eq!(attr.part(2).and_then(KeyPart::as_text), Some("title"));
        assert!(attr.starts_with(&base));
    }

    #[test]
    fn display_joins_with_slash() {
        let k = key(vec![1u64.into(), 0u64.into(), "State".into()]);
        assert_eq!(k.to_string(), "1/0/State");
    }

    #[test]
    fn serde_shape_is_flat_array() {
        let k = key(vec![250u64.into(), "owner".into()]);
        let json = serde_json::to_string(&k).unwrap();
        assert_eq!(json, r#"[250,"owner"]"#);
        let back: CompositeKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, k);
    }
}
