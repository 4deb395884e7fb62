use std::borrow::Cow;

/// Percent-encodes a single path segment.
///
/// Every byte outside the unreserved set `[A-Za-z0-9._~-]` is escaped,
/// including `/`, `?`, `#`, `%` and spaces, so the segment survives URL
/// resolution literally.
pub fn escape_path_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unreserved_passthrough() {
        assert_eq!(escape_path_segment("sms-gw_1.v2~x"), "sms-gw_1.v2~x");
    }

    #[test]
    fn test_reserved_characters_escaped() {
        assert_eq!(escape_path_segment("mail/v1"), "mail%2Fv1");
        assert_eq!(escape_path_segment("my provider/v2"), "my%20provider%2Fv2");
        assert_eq!(escape_path_segment("a?b#c%d"), "a%3Fb%23c%25d");
        assert_eq!(escape_path_segment("a:b@c+d"), "a%3Ab%40c%2Bd");
    }

    #[test]
    fn test_non_ascii_escaped_as_utf8() {
        assert_eq!(escape_path_segment("é"), "%C3%A9");
    }

    proptest! {
        #[test]
        fn prop_escape_round_trips(segment in any::<String>()) {
            let escaped = escape_path_segment(&segment);
            prop_assert!(escaped
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b"-._~%".contains(&b)));
            let decoded = urlencoding::decode(&escaped).unwrap();
            prop_assert_eq!(decoded.as_ref(), segment.as_str());
        }
    }
}
