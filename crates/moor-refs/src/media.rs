use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RefError, RefResult};

/// Canonical extension <-> MIME type table.
///
/// Ordered: the first row matching a MIME type supplies its canonical
/// extension (so `image/jpeg` normalizes to `jpg`, while a stored `jpeg`
/// extension still resolves back to `image/jpeg`).
const MEDIA_TABLE: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("html", "text/html"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
    ("bin", "application/octet-stream"),
];

/// The extension marking a structured (JSON) payload.
const STRUCTURED_EXTENSION: &str = "json";

/// A media hint embedded in a typed reference, stored as a short extension.
///
/// Consumers that need a content type rather than an extension re-derive
/// it via [`MediaHint::content_type`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaHint {
    extension: String,
}

impl MediaHint {
    /// Normalize a label into a media hint.
    ///
    /// A MIME type (contains `/`) is reduced to its canonical short
    /// extension; anything else is treated as an extension and embedded
    /// as-is. Fails for MIME types outside the table and for extensions
    /// containing the reference separator.
    pub fn from_label(label: &str) -> RefResult<Self> {
        if label.contains('/') {
            let extension = MEDIA_TABLE
                .iter()
                .find(|(_, mime)| *mime == label)
                .map(|(ext, _)| (*ext).to_string())
                .ok_or_else(|| RefError::UnknownMediaType(label.to_string()))?;
            Ok(Self { extension })
        } else if label.contains(':') || label.is_empty() {
            Err(RefError::InvalidExtension(label.to_string()))
        } else {
            Ok(Self {
                extension: label.to_string(),
            })
        }
    }

    /// The hint for structured (JSON) payloads.
    pub fn structured() -> Self {
        Self {
            extension: STRUCTURED_EXTENSION.to_string(),
        }
    }

    /// The embedded short extension.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Re-derive the MIME type, if the extension is in the table.
    pub fn content_type(&self) -> Option<&'static str> {
        MEDIA_TABLE
            .iter()
            .find(|(ext, _)| *ext == self.extension)
            .map(|(_, mime)| *mime)
    }

    /// Whether the referenced payload is structured data rather than an
    /// opaque byte sequence.
    pub fn is_structured(&self) -> bool {
        self.extension == STRUCTURED_EXTENSION
    }
}

impl fmt::Display for MediaHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_normalizes_to_canonical_extension() {
        let hint = MediaHint::from_label("application/json").unwrap();
        assert_eq!(hint.extension(), "json");
        assert!(hint.is_structured());

        let hint = MediaHint::from_label("image/jpeg").unwrap();
        assert_eq!(hint.extension(), "jpg");
    }

    #[test]
    fn extension_passes_through() {
        let hint = MediaHint::from_label("pdf").unwrap();
        assert_eq!(hint.extension(), "pdf");
        assert_eq!(hint.content_type(), Some("application/pdf"));
        assert!(!hint.is_structured());
    }

    #[test]
    fn alias_extension_still_resolves() {
        let hint = MediaHint::from_label("jpeg").unwrap();
        assert_eq!(hint.content_type(), Some("image/jpeg"));
    }

    #[test]
    fn unknown_extension_has_no_content_type() {
        let hint = MediaHint::from_label("xyz").unwrap();
        assert_eq!(hint.content_type(), None);
    }

    #[test]
    fn unknown_mime_is_rejected() {
        let err = MediaHint::from_label("application/x-custom").unwrap_err();
        assert!(matches!(err, RefError::UnknownMediaType(_)));
    }

    #[test]
    fn separator_in_extension_is_rejected() {
        assert!(matches!(
            MediaHint::from_label("pd:f"),
            Err(RefError::InvalidExtension(_))
        ));
        assert!(matches!(
            MediaHint::from_label(""),
            Err(RefError::InvalidExtension(_))
        ));
    }
}
