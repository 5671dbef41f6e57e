//! Source resolution for uploaded files

use crate::error::{Error, Result};
use crate::source::file::{guess_media_type, UploadedFile, OCTET_STREAM};
use base64::Engine;
use std::path::Path;

/// Resolve a file path to an uploaded file.
///
/// The declared media type wins; otherwise it is guessed from the extension.
pub fn resolve_path<P: AsRef<Path>>(
    path: P,
    media_type: Option<&str>,
    max_bytes: u64,
) -> Result<UploadedFile> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let size = std::fs::metadata(path)?.len();
    if size > max_bytes {
        return Err(Error::FileTooLarge {
            size,
            max_size: max_bytes,
        });
    }

    let data = std::fs::read(path).map_err(Error::Io)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let media_type = media_type
        .map(str::to_string)
        .unwrap_or_else(|| guess_media_type(&name));

    Ok(UploadedFile {
        name,
        media_type,
        data,
    })
}

/// Resolve base64 encoded data to an uploaded file.
///
/// Without a declared media type the optional file name is used for guessing;
/// with neither the file is `application/octet-stream`.
pub fn resolve_base64(
    base64_data: &str,
    media_type: Option<&str>,
    file_name: Option<&str>,
    max_bytes: u64,
) -> Result<UploadedFile> {
    let engine = base64::engine::general_purpose::STANDARD;
    let data = engine.decode(base64_data.trim())?;

    if data.len() as u64 > max_bytes {
        return Err(Error::FileTooLarge {
            size: data.len() as u64,
            max_size: max_bytes,
        });
    }

    let name = file_name.unwrap_or("<base64>").to_string();
    let media_type = match (media_type, file_name) {
        (Some(declared), _) => declared.to_string(),
        (None, Some(file_name)) => guess_media_type(file_name),
        (None, None) => OCTET_STREAM.to_string(),
    };

    Ok(UploadedFile {
        name,
        media_type,
        data,
    })
}
