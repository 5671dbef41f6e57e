//! Scheme normalization and link list rendering

use schemars::JsonSchema;
use serde::Serialize;

/// Label shown in place of the list when no URLs were found
pub const NO_URLS_LABEL: &str = "No URLs detected.";

/// A single activatable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct UrlEntry {
    /// Link target, always carrying an `http://` or `https://` prefix
    pub href: String,
    /// Visible label (same as `href`)
    pub label: String,
    /// Whether the link opens in a new browsing context
    pub opens_new_context: bool,
}

/// Rendered URL list for one processing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UrlListView {
    /// One entry per candidate, in text order
    Links { entries: Vec<UrlEntry> },
    /// Sentinel shown when extraction found nothing
    NoneDetected { label: String },
}

impl UrlListView {
    /// The sentinel view
    pub fn none_detected() -> Self {
        UrlListView::NoneDetected {
            label: NO_URLS_LABEL.to_string(),
        }
    }

    /// Rendered entries (empty for the sentinel)
    pub fn entries(&self) -> &[UrlEntry] {
        match self {
            UrlListView::Links { entries } => entries,
            UrlListView::NoneDetected { .. } => &[],
        }
    }

    /// Link targets in display order
    pub fn hrefs(&self) -> Vec<&str> {
        self.entries().iter().map(|e| e.href.as_str()).collect()
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, UrlListView::NoneDetected { .. })
    }
}

impl Default for UrlListView {
    fn default() -> Self {
        UrlListView::Links {
            entries: Vec::new(),
        }
    }
}

/// Prepend `http://` unless the candidate already starts with `http://` or `https://`.
///
/// The check is case-sensitive, so `HTTP://x.io` becomes `http://HTTP://x.io`.
fn normalize(candidate: &str) -> String {
    if candidate.starts_with("http://") || candidate.starts_with("https://") {
        candidate.to_string()
    } else {
        format!("http://{}", candidate)
    }
}

/// Render extracted candidates as a link list, or the sentinel when there are none.
pub fn render<S: AsRef<str>>(candidates: &[S]) -> UrlListView {
    if candidates.is_empty() {
        return UrlListView::none_detected();
    }

    let entries = candidates
        .iter()
        .map(|c| {
            let href = normalize(c.as_ref());
            UrlEntry {
                label: href.clone(),
                href,
                opens_new_context: true,
            }
        })
        .collect();

    UrlListView::Links { entries }
}
