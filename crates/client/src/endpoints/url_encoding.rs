//! URL encoding utilities for constructing safe API paths.
//!
//! Search ids are opaque strings chosen by the console. They are
//! percent-encoded before being placed in a path so that an unexpected id can
//! never escape its segment (`../`, `?`, `#`).
//!
//! # Example
//!
//! ```
//! use qradar_client::endpoints::url_encoding::encode_path_segment;
//!
//! let encoded = encode_path_segment("abc/def");
//! assert_eq!(encoded, "abc%2Fdef");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// Based on RFC 3986 section 3.3:
/// - Space, quotes, angle brackets: problematic in URLs
/// - Backslash, pipe, caret, backtick: often blocked by proxies
/// - Percent: must be encoded to prevent double-decoding
/// - Slash: must be encoded to prevent path traversal
/// - Question mark and hash: have special URL meaning
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as a URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_search_id_unchanged() {
        let id = "6a2f3c1e-8b7d-4e0a-9f51-2c3d4e5f6a7b";
        assert_eq!(encode_path_segment(id), id);
    }

    #[test]
    fn test_encode_slash() {
        assert_eq!(encode_path_segment("../admin"), "..%2Fadmin");
    }

    #[test]
    fn test_encode_query_and_fragment() {
        assert_eq!(encode_path_segment("abc?x=1"), "abc%3Fx=1");
        assert_eq!(encode_path_segment("abc#frag"), "abc%23frag");
    }

    #[test]
    fn test_encode_percent_and_space() {
        assert_eq!(encode_path_segment("a%20b"), "a%2520b");
        assert_eq!(encode_path_segment("a b"), "a%20b");
    }

    #[test]
    fn test_encode_unicode() {
        assert_eq!(encode_path_segment("\u{2603}"), "%E2%98%83");
    }
}
