use base64::{Engine as _, engine::general_purpose};

use super::StorageError;

/// A decoded `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Parse and decode a base64 data-URL.
    ///
    /// Only the `;base64` encoding is accepted. Nothing here touches the network,
    /// so malformed uploads are rejected before a backend is ever called.
    pub fn parse(input: &str) -> Result<Self, StorageError> {
        let (header, payload) = input
            .trim()
            .split_once(',')
            .ok_or_else(|| StorageError::InvalidDataUrl("missing ',' separator".into()))?;

        let media = header
            .strip_prefix("data:")
            .ok_or_else(|| StorageError::InvalidDataUrl("missing 'data:' prefix".into()))?;

        let media = media
            .strip_suffix(";base64")
            .ok_or_else(|| StorageError::InvalidDataUrl("only base64 encoding is supported".into()))?;

        // Drop parameters such as `;charset=utf-8`
        let mime_type = media.split(';').next().unwrap_or_default().trim().to_lowercase();

        match mime_type.split_once('/') {
            Some((kind, subtype)) if is_token(kind) && is_token(subtype) => {}
            _ => {
                return Err(StorageError::InvalidDataUrl(format!(
                    "invalid MIME type '{}'",
                    mime_type
                )));
            }
        }

        let data = general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| StorageError::InvalidBase64(e.to_string()))?;

        Ok(Self { mime_type, data })
    }

    /// File extension derived from the MIME subtype (`image/svg+xml` -> `.svg`).
    pub fn extension(&self) -> String {
        let subtype = self
            .mime_type
            .split_once('/')
            .map(|(_, sub)| sub)
            .unwrap_or_default();
        let subtype = subtype.split(['+', ';']).next().unwrap_or_default();

        // The extension ends up in object keys and public URLs
        if subtype.is_empty() || !subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
            return String::new();
        }
        format!(".{}", subtype)
    }
}

/// RFC 2045 `token`: printable ASCII without spaces, controls or tspecials.
fn is_token(value: &str) -> bool {
    const TSPECIALS: &[char] = &['(', ')', '<', '>', '@', ',', ';', ':', '\\', '"', '/', '[', ']', '?', '='];
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_graphic() && !TSPECIALS.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    #[test]
    fn parses_png_data_url() {
        let parsed = DataUrl::parse(PNG).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(&parsed.data[1..4], b"PNG");
        assert_eq!(parsed.extension(), ".png");
    }

    #[test]
    fn rejects_missing_comma() {
        let err = DataUrl::parse("data:image/png;base64").unwrap_err();
        assert!(matches!(err, StorageError::InvalidDataUrl(_)));
    }

    #[test]
    fn rejects_missing_base64_marker() {
        let err = DataUrl::parse("data:image/png,aGVsbG8=").unwrap_err();
        assert!(matches!(err, StorageError::InvalidDataUrl(_)));
    }

    #[test]
    fn rejects_missing_data_prefix() {
        let err = DataUrl::parse("image/png;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, StorageError::InvalidDataUrl(_)));
    }

    #[test]
    fn rejects_bad_mime_type() {
        let err = DataUrl::parse("data:png;base64,aGVsbG8=").unwrap_err();
        assert!(matches!(err, StorageError::InvalidDataUrl(_)));
    }

    #[test]
    fn rejects_undecodable_payload() {
        let err = DataUrl::parse("data:image/png;base64,@@not base64@@").unwrap_err();
        assert!(matches!(err, StorageError::InvalidBase64(_)));
    }

    #[test]
    fn extension_strips_structured_suffix() {
        let parsed = DataUrl::parse("data:image/svg+xml;base64,PHN2Zy8+").unwrap();
        assert_eq!(parsed.extension(), ".svg");
        assert_eq!(parsed.data, b"<svg/>");
    }

    #[test]
    fn rejects_mime_types_that_are_not_tokens() {
        for bad in [
            "data:image/png?x=1;base64,aGVsbG8=",
            "data:image/png/../../other;base64,aGVsbG8=",
            "data:image/png[1];base64,aGVsbG8=",
            "data:image/p ng;base64,aGVsbG8=",
            "data:ima=ge/png;base64,aGVsbG8=",
        ] {
            let err = DataUrl::parse(bad).unwrap_err();
            assert!(matches!(err, StorageError::InvalidDataUrl(_)), "{}", bad);
        }
    }

    #[test]
    fn extension_is_alphanumeric_or_absent() {
        let parsed = DataUrl::parse("data:image/png#frag;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.extension(), "");

        let parsed = DataUrl::parse("data:application/x.custom;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.extension(), "");

        let parsed = DataUrl::parse("data:image/WEBP;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.extension(), ".webp");
    }

    #[test]
    fn ignores_mime_parameters() {
        let parsed = DataUrl::parse("data:text/plain;charset=utf-8;base64,aGVsbG8=").unwrap();
        assert_eq!(parsed.mime_type, "text/plain");
        assert_eq!(parsed.data, b"hello");
    }
}
