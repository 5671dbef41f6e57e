//! URL Extract MCP Server Library
//!
//! This crate extracts text and embedded URLs from uploaded files:
//! - `process_file`: Read a PDF, image (OCR), or plain text file and list its URLs
//! - `get_view`: Show the current status line, text, and URL list
//! - `save_text`: Save the displayed text as `extracted_text.txt`
//! - `extract_urls`: Find URLs in a piece of text

pub mod dispatch;
pub mod error;
pub mod export;
pub mod reader;
pub mod server;
pub mod source;
pub mod urls;

pub use dispatch::{Dispatcher, RunState, ViewModel};
pub use error::{Error, Result};
pub use server::{
    run_server, run_server_with_config, run_server_with_dirs, FileSource, ServerConfig, UrlServer,
};
pub use urls::{extract, render, UrlEntry, UrlListView};
