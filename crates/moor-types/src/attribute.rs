use serde::{Deserialize, Serialize};

/// An asset attribute as stored on the ledger, before resolution.
///
/// `raw` is either a literal value (public attribute) or an encoded typed
/// reference pointing into an off-chain store. Classification happens in
/// the resolver, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeEntry {
    /// Attribute label, unique within one asset.
    pub key: String,
    /// On-chain value string, verbatim.
    pub raw: String,
}

impl AttributeEntry {
    /// Create a new entry.
    pub fn new(key: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            raw: raw.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() {
        let e = AttributeEntry::new("title", "Deed");
        assert_eq!(e.key, "title");
        assert_eq!(e.raw, "Deed");
    }
}
