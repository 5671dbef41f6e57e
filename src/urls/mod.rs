//! URL detection layer
//!
//! Finds URL-like substrings in free text and turns them into a renderable list.

mod extractor;
mod render;

pub use extractor::{extract, extract_and_render, URL_PATTERN};
pub use render::{render, UrlEntry, UrlListView, NO_URLS_LABEL};
