//! Saving the displayed text to a local file

use crate::error::Result;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the exported artifact
pub const EXPORT_FILE_NAME: &str = "extracted_text.txt";

/// Content type of the exported artifact
pub const EXPORT_CONTENT_TYPE: &str = "text/plain";

/// Details of a written export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct ExportedFile {
    pub path: String,
    pub bytes: u64,
    pub content_type: String,
}

/// Where an export into `dir` lands
pub fn export_path(dir: &Path) -> PathBuf {
    dir.join(EXPORT_FILE_NAME)
}

/// Write `text` verbatim to `dir/extracted_text.txt`, creating `dir` if needed.
///
/// An existing export in the same directory is overwritten.
pub fn export(text: &str, dir: &Path) -> Result<ExportedFile> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }

    let path = export_path(dir);
    std::fs::write(&path, text.as_bytes())?;
    info!(path = %path.display(), bytes = text.len(), "Exported extracted text");

    Ok(ExportedFile {
        path: path.display().to_string(),
        bytes: text.len() as u64,
        content_type: EXPORT_CONTENT_TYPE.to_string(),
    })
}
