//! Plans the text for sharing a tasting note as a post.
//!
//! The primary post carries the header fields, as much of the summary as fits, the app
//! URL and the hashtag. Summary text that had to be cut goes into continuation posts
//! (see [`crate::chunks`]) for the user to paste as replies.

use serde::Serialize;
use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::chunks::split_continuation;
use crate::config::ShareConfig;
use crate::weight::{weighted_len, MAX_WEIGHTED_LEN};

/// Appended to a summary (or whole post) that was cut short.
pub const ELLIPSIS: &str = "…";

/// The parts of a note that go into a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShareNote<'a> {
    pub whisky_name: &'a str,
    /// Score out of 100.
    pub rating: Option<i64>,
    pub summary: Option<&'a str>,
}

/// Result of planning: one postable message plus continuation posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharePlan {
    pub primary: String,
    pub overflow: Vec<String>,
}

/// Plans the posts for `note`.
///
/// The primary post never exceeds [`MAX_WEIGHTED_LEN`]. When the header fields alone are
/// too long the whole post is cut instead and no continuation is produced; that text is
/// lost.
pub fn compute_share_plan(note: &ShareNote<'_>, config: &ShareConfig) -> SharePlan {
    let summary = note.summary.unwrap_or("").trim();
    let full = build_primary(note, config, summary, false);
    if weighted_len(&full) <= MAX_WEIGHTED_LEN {
        return SharePlan {
            primary: full,
            overflow: Vec::new(),
        };
    }

    let units: Vec<&str> = summary.graphemes(true).collect();
    let mut used = units.len();
    let mut primary = full;
    while used > 0 && weighted_len(&primary) > MAX_WEIGHTED_LEN {
        used -= 1;
        primary = build_primary(note, config, &units[..used].concat(), true);
    }

    if weighted_len(&primary) > MAX_WEIGHTED_LEN {
        warn!(
            whisky_name = note.whisky_name,
            weighted_len = weighted_len(&primary),
            "fixed fields exceed post limit, cutting whole post"
        );
        return SharePlan {
            primary: force_trim(&primary, MAX_WEIGHTED_LEN),
            overflow: Vec::new(),
        };
    }

    let remainder = units[used..].concat();
    let overflow = split_continuation(&remainder);
    debug!(
        kept_units = used,
        cut_units = units.len() - used,
        continuation_posts = overflow.len(),
        "summary split across posts"
    );
    SharePlan { primary, overflow }
}

/// Builds the primary post: name, score, summary, app URL, hashtag, one per line.
/// Lines with nothing to show are left out. That includes an empty `app_url` or `hashtag`
/// in `config`, which are otherwise always present.
pub fn build_primary(
    note: &ShareNote<'_>,
    config: &ShareConfig,
    summary: &str,
    ellipsis: bool,
) -> String {
    let header = (!note.whisky_name.is_empty()).then(|| format!("銘柄: {}", note.whisky_name));
    let score = note.rating.map(|r| format!("スコア: {}/100", r));
    let summary_line = (!summary.is_empty()).then(|| {
        let mark = if ellipsis { ELLIPSIS } else { "" };
        format!("総合: {}{}", summary, mark)
    });

    [header, score, summary_line]
        .into_iter()
        .flatten()
        .chain([config.app_url.clone(), config.hashtag.clone()])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cuts trailing units off `text`, appending [`ELLIPSIS`], until it fits in `limit`.
fn force_trim(text: &str, limit: usize) -> String {
    if weighted_len(text) <= limit {
        return text.to_string();
    }
    let units: Vec<&str> = text.graphemes(true).collect();
    let mut end = units.len();
    let mut trimmed = text.to_string();
    while end > 0 && weighted_len(&trimmed) > limit {
        end -= 1;
        trimmed = format!("{}{}", units[..end].concat(), ELLIPSIS);
    }
    trimmed
}
