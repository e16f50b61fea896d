//! Data-URL (RFC 2397) encoding helpers.
//!
//! The cache stores only the base64 payload of a fetched asset, not the full
//! `data:<mime>;base64,…` string — the rendering pipeline re-attaches the
//! header it needs. [`encode`] builds the full data URL from raw bytes;
//! [`content`] strips the header back off.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Content type assumed when the response carries no `Content-Type` header.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Encodes raw bytes as a base64 data URL with the given content type.
///
/// # Examples
///
/// ```
/// let url = inliner::data_url::encode(b"hi", "text/plain");
/// assert_eq!(url, "data:text/plain;base64,aGk=");
/// ```
pub fn encode(bytes: &[u8], content_type: &str) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Returns the encoded payload of a data URL — everything after the first
/// comma. A string without a comma has no payload and yields `""`.
///
/// # Examples
///
/// ```
/// assert_eq!(inliner::data_url::content("data:text/plain;base64,aGk="), "aGk=");
/// assert_eq!(inliner::data_url::content("not-a-data-url"), "");
/// ```
pub fn content(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map(|(_, payload)| payload)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_produces_rfc2397_form() {
        let url = encode(&[0x89, b'P', b'N', b'G'], "image/png");
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn encode_empty_body() {
        assert_eq!(encode(b"", "image/png"), "data:image/png;base64,");
    }

    #[test]
    fn content_strips_header() {
        assert_eq!(content("data:image/png;base64,iVBORw=="), "iVBORw==");
    }

    #[test]
    fn content_keeps_payload_commas() {
        // Only the first comma delimits the header.
        assert_eq!(content("data:text/plain,a,b"), "a,b");
    }

    #[test]
    fn content_of_headerless_string_is_empty() {
        assert_eq!(content("aGk="), "");
    }

    #[test]
    fn encode_then_content_round_trips_payload() {
        let url = encode(b"hello", FALLBACK_CONTENT_TYPE);
        assert_eq!(content(&url), "aGVsbG8=");
    }
}
