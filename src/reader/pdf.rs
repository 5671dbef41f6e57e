//! PDF reader
//!
//! The decoding collaborator hands back, per page, the positioned text runs
//! in the order the document supplies them. Page text is rebuilt from those
//! runs here, so the layout rules do not depend on the PDF backend.

use super::{ExtractedText, SourceReader};
use crate::error::{Error, Result};
use crate::source::{MediaKind, UploadedFile};
use async_trait::async_trait;
use pdfium_render::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Rise in vertical position over the previous run that starts a new line
pub const LINE_BREAK_THRESHOLD: f32 = 10.0;

const PAGE_SEPARATOR: &str = "\n\n";

/// A string drawn at a vertical position on a page
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub y: f32,
}

impl TextRun {
    pub fn new(text: impl Into<String>, y: f32) -> Self {
        Self {
            text: text.into(),
            y,
        }
    }
}

/// PDF decoding collaborator.
///
/// Implementations are blocking and are driven from the blocking thread pool.
/// A failure on any page fails the whole document.
pub trait PdfTextSource: Send + Sync {
    /// Decode `data` into one ordered run list per page.
    fn page_runs(&self, data: &[u8]) -> Result<Vec<Vec<TextRun>>>;
}

/// Rebuild one page's text from its runs.
///
/// Every run is followed by a single space, and a newline is inserted before
/// a run whose vertical position exceeds the previous run's by more than
/// [`LINE_BREAK_THRESHOLD`]. Downward moves never break the line.
pub fn reconstruct_page_text(runs: &[TextRun]) -> String {
    let mut page_text = String::new();
    let mut last_y: Option<f32> = None;

    for run in runs {
        if let Some(prev) = last_y {
            if run.y > prev + LINE_BREAK_THRESHOLD {
                page_text.push('\n');
            }
        }
        page_text.push_str(&run.text);
        page_text.push(' ');
        last_y = Some(run.y);
    }

    page_text
}

/// Join page texts with a blank line between pages
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|p| p.as_ref())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Reader for PDF files
#[derive(Clone)]
pub struct PdfReader {
    source: Arc<dyn PdfTextSource>,
}

impl PdfReader {
    pub fn new(source: Arc<dyn PdfTextSource>) -> Self {
        Self { source }
    }

    /// Reader backed by PDFium
    pub fn pdfium() -> Self {
        Self::new(Arc::new(PdfiumTextSource))
    }
}

impl Default for PdfReader {
    fn default() -> Self {
        Self::pdfium()
    }
}

#[async_trait]
impl SourceReader for PdfReader {
    fn kind(&self) -> MediaKind {
        MediaKind::Pdf
    }

    async fn read(&self, file: &UploadedFile) -> Result<ExtractedText> {
        debug!(name = %file.name, bytes = file.data.len(), "Reading PDF");

        // Move CPU-heavy PDF work to blocking thread pool
        let source = Arc::clone(&self.source);
        let data = file.data.clone();
        let pages = tokio::task::spawn_blocking(move || source.page_runs(&data))
            .await
            .map_err(|e| Error::Pdfium {
                reason: format!("Task join error: {}", e),
            })??;

        let page_texts: Vec<String> = pages.iter().map(|runs| reconstruct_page_text(runs)).collect();
        debug!(pages = page_texts.len(), "PDF pages decoded");

        Ok(ExtractedText::plain(join_pages(&page_texts), page_texts.len()))
    }
}

/// [`PdfTextSource`] backed by PDFium text segments
pub struct PdfiumTextSource;

impl PdfiumTextSource {
    /// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
    fn create_pdfium() -> Result<Pdfium> {
        // Try to bind to system library or use static linking
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| {
                Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                    "/opt/pdfium/lib",
                ))
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to initialize PDFium: {}", e),
            })?;

        Ok(Pdfium::new(bindings))
    }

    /// Map PDFium errors to our error type
    fn map_pdfium_error(err: PdfiumError) -> Error {
        match err {
            PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
                Error::PasswordRequired
            }
            _ => Error::Pdfium {
                reason: format!("{}", err),
            },
        }
    }

    fn collect_runs(page: &PdfPage, page_num: usize) -> Result<Vec<TextRun>> {
        let text = page.text().map_err(|e| Error::Pdfium {
            reason: format!("Failed to read text of page {}: {}", page_num, e),
        })?;

        let runs = text
            .segments()
            .iter()
            .map(|segment| TextRun {
                text: segment.text(),
                y: segment.bounds().top().value,
            })
            .collect();
        Ok(runs)
    }
}

impl PdfTextSource for PdfiumTextSource {
    fn page_runs(&self, data: &[u8]) -> Result<Vec<Vec<TextRun>>> {
        if data.len() < 4 || &data[0..4] != b"%PDF" {
            return Err(Error::InvalidPdf {
                reason: "Not a valid PDF file".to_string(),
            });
        }

        let pdfium = Self::create_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(Self::map_pdfium_error)?;

        let pages = document
            .pages()
            .iter()
            .enumerate()
            .map(|(index, page)| Self::collect_runs(&page, index + 1))
            .collect::<Result<Vec<_>>>();
        pages
    }
}
