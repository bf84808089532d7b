//! Splits summary text that did not fit in the primary post into continuation posts.
//! Each post is the continuation marker followed by a chunk of the remainder.

use unicode_segmentation::UnicodeSegmentation;

use crate::weight::{weighted_len, MAX_WEIGHTED_LEN};

/// Prefix of every continuation post.
pub const CONTINUATION_MARKER: &str = "続き: ";

/// Upper bound on units taken into one chunk before the weight check.
pub const MAX_CHUNK_UNITS: usize = 260;

/// Splits `remainder` into continuation posts, left to right.
///
/// The remainder is not trimmed: stripping [`CONTINUATION_MARKER`] from every post and
/// concatenating the payloads gives back `remainder` exactly.
pub fn split_continuation(remainder: &str) -> Vec<String> {
    let units: Vec<&str> = remainder.graphemes(true).collect();
    let mut posts = Vec::new();
    let mut cursor = 0;
    while cursor < units.len() {
        let (post, consumed) = next_post(&units[cursor..]);
        posts.push(post);
        cursor += consumed;
    }
    posts
}

/// Builds one post from the head of `units`. Returns the post and how many units it took.
fn next_post(units: &[&str]) -> (String, usize) {
    let mut len = units.len().min(MAX_CHUNK_UNITS);
    while len > 0 {
        let post = continuation(&units[..len]);
        if weighted_len(&post) <= MAX_WEIGHTED_LEN {
            return (post, len);
        }
        len -= 1;
    }
    // One unit heavier than a whole post: take it anyway so the cursor moves.
    (continuation(&units[..1]), 1)
}

fn continuation(units: &[&str]) -> String {
    let mut post = String::from(CONTINUATION_MARKER);
    post.extend(units.iter().copied());
    post
}

/// Strips the marker from a continuation post. Returns `None` for anything else.
pub fn continuation_payload(post: &str) -> Option<&str> {
    post.strip_prefix(CONTINUATION_MARKER)
}
