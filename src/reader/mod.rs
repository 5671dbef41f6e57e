//! Source readers
//!
//! Each reader turns an [`UploadedFile`] of one media kind into
//! [`ExtractedText`]. PDF decoding and optical character recognition are
//! delegated to collaborators behind the [`PdfTextSource`] and [`OcrEngine`]
//! traits; plain text is decoded directly.

mod ocr;
mod pdf;
mod registry;
mod text;

pub use ocr::{ImageReader, OcrEngine, TesseractCli, OCR_LANGUAGE};
pub use pdf::{
    join_pages, reconstruct_page_text, PdfReader, PdfTextSource, PdfiumTextSource, TextRun,
    LINE_BREAK_THRESHOLD,
};
pub use registry::ReaderRegistry;
pub use text::TextReader;

use crate::error::Result;
use crate::source::{MediaKind, UploadedFile};
use async_trait::async_trait;

/// Prefix put in front of OCR and plain-text output in the display region
pub const DISPLAY_PREFIX: &str = "Extracted Text:\n";

/// Text obtained from one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Text as shown in the display region
    pub display: String,
    /// Text scanned for URLs
    pub content: String,
    /// Number of pages or segments the text was assembled from
    pub fragments: usize,
}

impl ExtractedText {
    /// Text shown with [`DISPLAY_PREFIX`] in front of the content
    pub fn prefixed(content: String) -> Self {
        Self {
            display: format!("{}{}", DISPLAY_PREFIX, content),
            content,
            fragments: 1,
        }
    }

    /// Text shown exactly as extracted
    pub fn plain(content: String, fragments: usize) -> Self {
        Self {
            display: content.clone(),
            content,
            fragments,
        }
    }
}

/// Trait for per-media-kind readers.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// The media kind this reader handles
    fn kind(&self) -> MediaKind;

    /// Status shown while [`SourceReader::read`] is pending, if it differs from the default
    fn progress_status(&self) -> Option<&'static str> {
        None
    }

    /// Obtain the text of `file`.
    async fn read(&self, file: &UploadedFile) -> Result<ExtractedText>;
}
