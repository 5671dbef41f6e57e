//! Error types for the URL extraction server

use thiserror::Error;

/// Result type alias for the URL extraction server
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the URL extraction server
#[derive(Error, Debug)]
pub enum Error {
    /// No file was supplied to a processing run
    #[error("No file supplied")]
    NoFile,

    /// File not found on disk
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Declared media type is not pdf, image, or text
    #[error("Unsupported media type: {media_type}")]
    UnsupportedMediaType { media_type: String },

    /// A run is already in progress
    #[error("A file is already being processed")]
    Busy,

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// PDF is password protected
    #[error("PDF is password protected")]
    PasswordRequired,

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// OCR engine failed to recognize the image
    #[error("OCR failed: {reason}")]
    Recognition { reason: String },

    /// Base64 decode error
    #[error("Invalid base64 data: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Path access denied (outside allowed resource directories)
    #[error("Path access denied: {path}")]
    PathAccessDenied { path: String },

    /// Upload too large
    #[error("File too large: {size} bytes (max: {max_size} bytes)")]
    FileTooLarge { size: u64, max_size: u64 },
}

impl Error {
    /// Return a sanitized error message safe to send to clients.
    /// Internal details (paths, library errors, file sizes) are omitted.
    /// Full details should be logged via tracing before calling this.
    pub fn client_message(&self) -> String {
        match self {
            Error::NoFile => "Please upload a file.".to_string(),
            Error::FileNotFound { .. } => "File not found".to_string(),
            Error::UnsupportedMediaType { .. } => "Unsupported file type.".to_string(),
            Error::Busy => "A file is already being processed".to_string(),
            Error::InvalidPdf { reason } => format!("Invalid PDF file: {}", reason),
            Error::PasswordRequired => "PDF is password protected".to_string(),
            Error::Pdfium { .. } => "PDF processing error".to_string(),
            Error::Recognition { reason } => format!("OCR failed: {}", reason),
            Error::Base64Decode(_) => "Invalid base64 data".to_string(),
            Error::Io(_) => "I/O error".to_string(),
            Error::PathAccessDenied { .. } => "Access denied".to_string(),
            Error::FileTooLarge { max_size, .. } => {
                format!("File exceeds maximum size of {} bytes", max_size)
            }
        }
    }
}
