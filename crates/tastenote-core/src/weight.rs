//! Weighted length of post text, the way the share platform counts it.
//!
//! Any `http://` or `https://` link counts as a fixed [`URL_WEIGHT`] no matter how long it
//! is. Everything else counts one per Unicode scalar value (never per byte).

use std::sync::LazyLock;

use regex::Regex;

/// Maximum weighted length of a single post.
pub const MAX_WEIGHTED_LEN: usize = 280;

/// Weight of every link, regardless of its real length.
pub const URL_WEIGHT: usize = 23;

/// Any `http://` or `https://` link, running until the next whitespace.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("URL pattern is valid"));

/// Returns the weighted length of `text`.
pub fn weighted_len(text: &str) -> usize {
    let mut total = 0;
    let mut last = 0;
    for m in URL_PATTERN.find_iter(text) {
        total += text[last..m.start()].chars().count() + URL_WEIGHT;
        last = m.end();
    }
    total + text[last..].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ascii_counts_chars() {
        assert_eq!(weighted_len(""), 0);
        assert_eq!(weighted_len("hello"), 5);
    }

    #[test]
    fn multibyte_counts_code_points_not_bytes() {
        assert_eq!(weighted_len("銘柄"), 2);
        assert_eq!(weighted_len("🥃🥃"), 2);
    }

    #[test]
    fn any_url_weighs_23() {
        assert_eq!(weighted_len("https://a.com"), URL_WEIGHT);
        assert_eq!(weighted_len("https://a.very.long.example.com/path?x=1"), URL_WEIGHT);
        assert_eq!(weighted_len("HTTP://SHOUTY.EXAMPLE"), URL_WEIGHT);
    }

    #[test]
    fn url_stops_at_whitespace() {
        let text = "see https://example.com/some/long/path now";
        assert_eq!(weighted_len(text), 4 + URL_WEIGHT + 4);
    }

    #[test]
    fn url_glued_to_preceding_text_still_counts_as_url() {
        assert_eq!(weighted_len("see:https://example.com/x"), 4 + URL_WEIGHT);
    }

    #[test]
    fn several_urls_each_weigh_23() {
        let text = "https://a.com\nhttps://b.example.org/x";
        assert_eq!(weighted_len(text), URL_WEIGHT * 2 + 1);
    }

    #[test]
    fn bare_scheme_is_not_a_url() {
        assert_eq!(weighted_len("https://"), 8);
        assert_eq!(weighted_len("ftp://example.com"), 17);
    }

    #[test]
    fn same_input_same_length() {
        let text = "スコア: 88/100\nhttps://whiskytastingnote-web.pages.dev";
        assert_eq!(weighted_len(text), weighted_len(text));
    }
}
