//! Reader registry keyed by media kind

use super::{ImageReader, OcrEngine, PdfReader, PdfTextSource, SourceReader, TextReader};
use crate::source::MediaKind;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of source readers.
pub struct ReaderRegistry {
    readers: HashMap<MediaKind, Arc<dyn SourceReader>>,
}

impl ReaderRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            readers: HashMap::new(),
        }
    }

    /// Registry with the PDF, image and text readers wired to the given collaborators
    pub fn with_collaborators(pdf: Arc<dyn PdfTextSource>, ocr: Arc<dyn OcrEngine>) -> Self {
        let mut registry = Self::new();
        registry.register(PdfReader::new(pdf));
        registry.register(ImageReader::new(ocr));
        registry.register(TextReader::new());
        registry
    }

    /// Register a reader, replacing any previous reader of the same kind.
    pub fn register<R: SourceReader + 'static>(&mut self, reader: R) {
        self.readers.insert(reader.kind(), Arc::new(reader));
    }

    /// Get the reader for a media kind.
    #[must_use]
    pub fn get(&self, kind: MediaKind) -> Option<Arc<dyn SourceReader>> {
        self.readers.get(&kind).cloned()
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl Default for ReaderRegistry {
    /// PDFium for PDFs, the `tesseract` binary for images, direct decoding for text
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(PdfReader::default());
        registry.register(ImageReader::default());
        registry.register(TextReader::new());
        registry
    }
}
