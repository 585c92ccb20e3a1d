use crate::codec::StoreKind;

/// Errors from encoding or decoding typed references.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefError {
    /// A recognized store prefix with a body that does not match the
    /// `<contentId>[:<extension>]` grammar. Never silently reclassified
    /// as an inline literal.
    #[error("malformed {kind} reference: {reason}")]
    MalformedReference { kind: StoreKind, reason: String },

    /// Content ids must not contain the `:` separator.
    #[error("content id contains reference separator: {0:?}")]
    UnencodableContentId(String),

    /// Extensions must not contain the `:` separator.
    #[error("extension contains reference separator: {0:?}")]
    InvalidExtension(String),

    /// A MIME type with no canonical short extension.
    #[error("no canonical extension for media type: {0}")]
    UnknownMediaType(String),

    /// Inline values never cross the codec boundary.
    #[error("inline values do not encode as typed references")]
    InlineNotEncodable,
}

/// Result alias for codec operations.
pub type RefResult<T> = Result<T, RefError>;
