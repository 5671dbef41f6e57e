//! Plain text reader

use super::{ExtractedText, SourceReader};
use crate::error::Result;
use crate::source::{MediaKind, UploadedFile};
use async_trait::async_trait;
use tracing::debug;

const UTF8_BOM: &str = "\u{feff}";

/// Reader for `text/*` files.
///
/// Bytes are decoded as UTF-8; invalid sequences become U+FFFD and a leading
/// byte order mark is dropped.
pub struct TextReader;

impl TextReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn decode(data: &[u8]) -> String {
        let text = String::from_utf8_lossy(data);
        text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_string()
    }
}

impl Default for TextReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceReader for TextReader {
    fn kind(&self) -> MediaKind {
        MediaKind::Text
    }

    async fn read(&self, file: &UploadedFile) -> Result<ExtractedText> {
        debug!(name = %file.name, bytes = file.data.len(), "Reading text file");
        Ok(ExtractedText::prefixed(Self::decode(&file.data)))
    }
}
