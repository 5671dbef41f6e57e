//! Image reader backed by optical character recognition

use super::{ExtractedText, SourceReader};
use crate::error::{Error, Result};
use crate::source::{MediaKind, UploadedFile};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, warn};

/// Recognition language (Tesseract code for English)
pub const OCR_LANGUAGE: &str = "eng";

/// OCR collaborator: turns image bytes into recognized text.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn recognize(&self, image: &[u8], language: &str) -> Result<String>;
}

/// [`OcrEngine`] that shells out to the `tesseract` binary
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
}

impl TesseractCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Temp file suffix for the sniffed image format
    fn suffix_for(image: &[u8]) -> String {
        image::guess_format(image)
            .ok()
            .and_then(|format| format.extensions_str().first().copied())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_else(|| ".img".to_string())
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

#[async_trait]
impl OcrEngine for TesseractCli {
    async fn recognize(&self, image: &[u8], language: &str) -> Result<String> {
        let mut input = tempfile::Builder::new()
            .prefix("url-extract-")
            .suffix(&Self::suffix_for(image))
            .tempfile()?;
        input.write_all(image)?;
        input.flush()?;

        debug!(binary = %self.binary.display(), language, "Running tesseract");

        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .await
            .map_err(|e| Error::Recognition {
                reason: format!("failed to run {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, "tesseract exited with an error");
            return Err(Error::Recognition {
                reason: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Reader for `image/*` files
#[derive(Clone)]
pub struct ImageReader {
    engine: Arc<dyn OcrEngine>,
}

impl ImageReader {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self { engine }
    }
}

impl Default for ImageReader {
    fn default() -> Self {
        Self::new(Arc::new(TesseractCli::default()))
    }
}

#[async_trait]
impl SourceReader for ImageReader {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn progress_status(&self) -> Option<&'static str> {
        Some("Processing Image...")
    }

    async fn read(&self, file: &UploadedFile) -> Result<ExtractedText> {
        debug!(name = %file.name, bytes = file.data.len(), "Recognizing image");
        let text = self.engine.recognize(&file.data, OCR_LANGUAGE).await?;
        Ok(ExtractedText::prefixed(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct RecordingEngine {
        languages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl OcrEngine for RecordingEngine {
        async fn recognize(&self, _image: &[u8], language: &str) -> Result<String> {
            self.languages.lock().push(language.to_string());
            Ok("Scan me at www.example.org\n".to_string())
        }
    }

    struct FailingEngine;

    #[async_trait]
    impl OcrEngine for FailingEngine {
        async fn recognize(&self, _image: &[u8], _language: &str) -> Result<String> {
            Err(Error::Recognition {
                reason: "image too small".to_string(),
            })
        }
    }

    fn image_file() -> UploadedFile {
        UploadedFile::new("scan.png", "image/png", b"\x89PNG\r\n\x1a\n".to_vec())
    }

    #[tokio::test]
    async fn test_read_prefixes_recognized_text() {
        let engine = Arc::new(RecordingEngine::default());
        let reader = ImageReader::new(engine.clone());

        let text = reader.read(&image_file()).await.unwrap();
        assert_eq!(text.display, "Extracted Text:\nScan me at www.example.org\n");
        assert_eq!(text.content, "Scan me at www.example.org\n");
        assert_eq!(*engine.languages.lock(), vec!["eng".to_string()]);
    }

    #[tokio::test]
    async fn test_read_propagates_recognition_error() {
        let reader = ImageReader::new(Arc::new(FailingEngine));
        let result = reader.read(&image_file()).await;
        assert!(matches!(result, Err(Error::Recognition { .. })));
    }

    #[test]
    fn test_suffix_for_sniffed_format() {
        assert_eq!(TesseractCli::suffix_for(b"\x89PNG\r\n\x1a\n0000"), ".png");
        assert_eq!(TesseractCli::suffix_for(b"plainly not an image"), ".img");
    }

    #[tokio::test]
    async fn test_missing_binary_is_recognition_error() {
        let engine = TesseractCli::new("/nonexistent/bin/tesseract");
        let result = engine.recognize(b"\x89PNG\r\n\x1a\n", OCR_LANGUAGE).await;
        assert!(matches!(result, Err(Error::Recognition { .. })));
    }

    #[test]
    fn test_image_reader_status() {
        assert_eq!(
            ImageReader::default().progress_status(),
            Some("Processing Image...")
        );
    }
}
