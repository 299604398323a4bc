//! Path segment encoding

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except RFC 3986 unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a caller supplied id for use as one path segment.
///
/// Teams ids contain `:` `@` `;` and sometimes `/`, which must not be
/// interpreted as path structure.
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc123", "abc123")]
    #[case("19:abc@thread.skype", "19%3Aabc%40thread.skype")]
    #[case("a/b", "a%2Fb")]
    #[case("a;messageid=1", "a%3Bmessageid%3D1")]
    #[case("with space", "with%20space")]
    #[case("~_-.", "~_-.")]
    fn test_encode_segment(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_segment(input), expected);
    }
}
