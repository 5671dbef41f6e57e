//! Uploaded file model and source resolution

pub mod file;
pub mod resolver;

pub use file::{MediaKind, UploadedFile};
pub use resolver::{resolve_base64, resolve_path};
