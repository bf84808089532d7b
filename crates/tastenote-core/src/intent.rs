//! Share-intent URL for opening the post composer with text filled in.

/// Endpoint of the post composer.
pub const INTENT_ENDPOINT: &str = "https://twitter.com/intent/tweet";

/// Returns the composer URL with `message` as the percent-encoded `text` parameter.
/// Does no length checking; pass an already planned primary post.
pub fn build_intent_url(message: &str) -> String {
    format!("{}?text={}", INTENT_ENDPOINT, urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_spaces_newlines_and_hash() {
        let url = build_intent_url("a b\n#Tag");
        assert_eq!(url, "https://twitter.com/intent/tweet?text=a%20b%0A%23Tag");
    }

    #[test]
    fn encodes_multibyte_as_utf8() {
        let url = build_intent_url("銘柄");
        assert_eq!(url, "https://twitter.com/intent/tweet?text=%E9%8A%98%E6%9F%84");
    }

    #[test]
    fn parses_back_to_the_message() {
        let message = "銘柄: Yamazaki 12\nスコア: 88/100\nhttps://example.com/?a=1&b=2";
        let url = url::Url::parse(&build_intent_url(message)).unwrap();
        let text = url
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned());
        assert_eq!(text.as_deref(), Some(message));
    }
}
