//! The single file handed to a processing run

use serde::Serialize;

/// Media type used when nothing better is known
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Which source reader a file is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Pdf,
    Image,
    Text,
    Unsupported,
}

impl MediaKind {
    /// Classify a declared media type.
    ///
    /// Checks are case-sensitive substring matches applied in order, so
    /// `application/pdf` and `image/x-pdf` are both `Pdf`, `text/html` is
    /// `Text`, and `Application/PDF` is `Unsupported`.
    pub fn classify(media_type: &str) -> Self {
        if media_type.contains("pdf") {
            MediaKind::Pdf
        } else if media_type.contains("image") {
            MediaKind::Image
        } else if media_type.contains("text") {
            MediaKind::Text
        } else {
            MediaKind::Unsupported
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Image => "image",
            MediaKind::Text => "text",
            MediaKind::Unsupported => "unsupported",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded file: name, declared media type and raw bytes
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Build a file whose media type is guessed from the name's extension
    pub fn with_guessed_type(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let media_type = guess_media_type(&name);
        Self {
            name,
            media_type,
            data,
        }
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::classify(&self.media_type)
    }
}

/// Guess a media type from a file name, falling back to `application/octet-stream`
pub fn guess_media_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}
