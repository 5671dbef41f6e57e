//! URL candidate extraction from free text

use super::render::{render, UrlListView};
use regex::Regex;
use std::sync::LazyLock;

/// Pattern for URL-like substrings.
///
/// An optional `http://`, `https://` or `www.` prefix, a host made of
/// letters, digits, dots and dashes, one of a fixed set of top-level domains,
/// and an optional `/` followed by any run of non-whitespace characters.
/// Nothing is required after the TLD, so `example.community` yields
/// `example.com`.
///
/// The word boundary and the case-insensitive part are ASCII-only, so a
/// non-ASCII letter never joins or folds into a host.
pub const URL_PATTERN: &str = r"(?-u:\b)(?i-u:(?:https?://|www\.)?[a-zA-Z0-9.-]+\.(?:com|net|org|io|edu|gov|co|us|uk|info|biz|me|tech|ai|xyz))(?:/[^\s]*)?";

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(URL_PATTERN).expect("URL_PATTERN is a valid regex"));

/// Extract every non-overlapping URL candidate from `text`, in order of appearance.
///
/// Duplicates are kept and trailing punctuation inside a path is not trimmed.
pub fn extract(text: &str) -> Vec<String> {
    URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract candidates from `text` and render them as a link list.
pub fn extract_and_render(text: &str) -> UrlListView {
    render(&extract(text))
}
