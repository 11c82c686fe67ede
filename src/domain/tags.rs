//! Tag normalization applied to every entry before it is stored.

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED_TAG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_-]").expect("tag pattern is valid"));

/// Normalizes a single tag.
///
/// Trims surrounding whitespace, lower-cases, turns spaces into hyphens and
/// drops every character outside `[a-z0-9_-]`.
///
/// ```ignore
/// assert_eq!(normalize_tag("  Web Dev!! "), "web-dev");
/// ```
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim().to_lowercase().replace(' ', "-");
    DISALLOWED_TAG_CHARS.replace_all(&tag, "").into_owned()
}

/// Splits a comma-separated tag string as submitted through the admin form.
///
/// Empty pieces are dropped; the remaining tags are returned untouched and are
/// normalized when the entry is saved.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|piece| !piece.trim().is_empty())
        .map(str::to_string)
        .collect()
}
