use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RefError, RefResult};
use crate::media::MediaHint;

/// Separator between content id and extension inside a reference body.
const SEPARATOR: char = ':';

/// Content-id placeholder written by clients for attributes that were
/// declared but never populated. Such references decode normally but must
/// never be dispatched to a store.
const ABSENT_MARKER: &str = "undefined";

/// Which backing store holds an attribute's real value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreKind {
    /// The value is stored verbatim on-chain.
    Inline,
    /// Content-addressed plaintext store.
    Content,
    /// Access-controlled confidential-document store.
    Confidential,
}

impl StoreKind {
    /// The on-chain prefix identifying this store. `Inline` has none:
    /// inline values never cross the codec boundary.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Self::Inline => None,
            Self::Content => Some("IPFS:"),
            Self::Confidential => Some("HCD:"),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline => write!(f, "inline"),
            Self::Content => write!(f, "content"),
            Self::Confidential => write!(f, "confidential"),
        }
    }
}

/// The store kinds with a registered on-chain prefix, in match order.
const REGISTERED: [StoreKind; 2] = [StoreKind::Content, StoreKind::Confidential];

/// A decoded typed reference: store routing + content id + media hint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedRef {
    pub kind: StoreKind,
    pub content_id: String,
    pub media: Option<MediaHint>,
}

impl TypedRef {
    /// True when the content id is the absent-marker placeholder: the
    /// attribute shape was declared on-chain but the payload was never
    /// stored. Resolution must skip the store lookup.
    pub fn is_unpopulated(&self) -> bool {
        self.content_id.is_empty() || self.content_id == ABSENT_MARKER
    }

    /// Serialize back to the on-chain string form.
    pub fn encode(&self) -> RefResult<String> {
        encode(self.kind, &self.content_id, self.media.as_ref())
    }
}

/// Encode a store routing decision into the on-chain string form
/// `"<PREFIX><contentId>[:<extension>]"`.
///
/// Deterministic and reversible: content ids and extensions must not
/// contain the separator, so decomposition on read is unambiguous.
pub fn encode(kind: StoreKind, content_id: &str, media: Option<&MediaHint>) -> RefResult<String> {
    let prefix = kind.prefix().ok_or(RefError::InlineNotEncodable)?;
    if content_id.contains(SEPARATOR) {
        return Err(RefError::UnencodableContentId(content_id.to_string()));
    }
    match media {
        Some(hint) => Ok(format!("{prefix}{content_id}{SEPARATOR}{hint}")),
        None => Ok(format!("{prefix}{content_id}")),
    }
}

/// Decode an on-chain attribute value.
///
/// Returns `Ok(None)` when `raw` starts with no registered prefix — the
/// value is an inline literal, to be passed through unchanged. A
/// recognized prefix with a malformed body is a hard error, never a
/// fallback to literal.
pub fn decode(raw: &str) -> RefResult<Option<TypedRef>> {
    for kind in REGISTERED {
        let prefix = kind.prefix().unwrap_or_default();
        let Some(body) = raw.strip_prefix(prefix) else {
            continue;
        };

        let mut fields = body.split(SEPARATOR);
        let content_id = fields.next().unwrap_or_default().to_string();
        let media = match fields.next() {
            None => None,
            Some("") => {
                return Err(RefError::MalformedReference {
                    kind,
                    reason: "empty extension".to_string(),
                })
            }
            Some(ext) => {
                let hint = MediaHint::from_label(ext).map_err(|e| RefError::MalformedReference {
                    kind,
                    reason: e.to_string(),
                })?;
                Some(hint)
            }
        };
        if fields.next().is_some() {
            return Err(RefError::MalformedReference {
                kind,
                reason: "too many separator fields".to_string(),
            });
        }

        return Ok(Some(TypedRef {
            kind,
            content_id,
            media,
        }));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_content_reference_with_mime_hint() {
        let hint = MediaHint::from_label("application/json").unwrap();
        let raw = encode(StoreKind::Content, "bafy123", Some(&hint)).unwrap();
        assert_eq!(raw, "IPFS:bafy123:json");
    }

    #[test]
    fn decode_content_reference() {
        let decoded = decode("IPFS:bafy123:json").unwrap().unwrap();
        assert_eq!(decoded.kind, StoreKind::Content);
        assert_eq!(decoded.content_id, "bafy123");
        assert_eq!(decoded.media.unwrap().extension(), "json");
    }

    #[test]
    fn decode_confidential_reference_without_hint() {
        let decoded = decode("HCD:cid77").unwrap().unwrap();
        assert_eq!(decoded.kind, StoreKind::Confidential);
        assert_eq!(decoded.content_id, "cid77");
        assert_eq!(decoded.media, None);
    }

    #[test]
    fn unrecognized_prefix_is_inline_literal() {
        assert_eq!(decode("Deed").unwrap(), None);
        assert_eq!(decode("10000").unwrap(), None);
        // Case matters: the grammar registers the uppercase forms only.
        assert_eq!(decode("ipfs:bafy123").unwrap(), None);
        assert_eq!(decode("").unwrap(), None);
    }

    #[test]
    fn recognized_prefix_with_malformed_body_is_hard_error() {
        let err = decode("IPFS:a:json:extra").unwrap_err();
        assert!(matches!(err, RefError::MalformedReference { .. }));

        let err = decode("HCD:cid77:").unwrap_err();
        assert!(matches!(err, RefError::MalformedReference { .. }));

        // An un-normalizable media label inside a recognized reference is
        // also a malformed body, and still carries the store kind.
        let err = decode("IPFS:bafy123:application/x-custom").unwrap_err();
        assert!(matches!(
            err,
            RefError::MalformedReference {
                kind: StoreKind::Content,
                ..
            }
        ));
    }

    #[test]
    fn absent_marker_decodes_as_unpopulated() {
        let decoded = decode("IPFS:undefined").unwrap().unwrap();
        assert!(decoded.is_unpopulated());

        let decoded = decode("HCD:").unwrap().unwrap();
        assert!(decoded.is_unpopulated());

        let decoded = decode("IPFS:bafy123").unwrap().unwrap();
        assert!(!decoded.is_unpopulated());
    }

    #[test]
    fn inline_never_encodes() {
        assert_eq!(
            encode(StoreKind::Inline, "x", None),
            Err(RefError::InlineNotEncodable)
        );
    }

    #[test]
    fn separator_in_content_id_is_rejected() {
        assert!(matches!(
            encode(StoreKind::Content, "bad:cid", None),
            Err(RefError::UnencodableContentId(_))
        ));
    }

    #[test]
    fn typed_ref_reencodes() {
        let decoded = decode("IPFS:bafy123:json").unwrap().unwrap();
        assert_eq!(decoded.encode().unwrap(), "IPFS:bafy123:json");
    }

    mod round_trip {
        use super::*;
        use proptest::prelude::*;

        fn store_kinds() -> impl Strategy<Value = StoreKind> {
            prop_oneof![Just(StoreKind::Content), Just(StoreKind::Confidential)]
        }

        proptest! {
            #[test]
            fn decode_inverts_encode(
                kind in store_kinds(),
                content_id in "[A-Za-z0-9/._-]{1,48}",
                extension in proptest::option::of("[a-z0-9]{1,8}"),
            ) {
                let media = extension
                    .as_deref()
                    .map(|ext| MediaHint::from_label(ext).unwrap());
                let raw = encode(kind, &content_id, media.as_ref()).unwrap();
                let decoded = decode(&raw).unwrap().expect("registered prefix");
                prop_assert_eq!(decoded.kind, kind);
                prop_assert_eq!(decoded.content_id, content_id);
                prop_assert_eq!(decoded.media, media);
            }
        }
    }
}
