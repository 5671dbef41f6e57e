//! Input dispatcher
//!
//! Routes one uploaded file at a time to the reader for its media kind and
//! publishes the outcome into a [`ViewModel`]. A run moves
//! `Idle -> Processing -> Done | Failed`; the displayed text and URL list are
//! replaced together, and only when a run succeeds.
//!
//! A file submitted while another run is processing is rejected with
//! [`Error::Busy`] and leaves the active run and the view alone.

use crate::error::{Error, Result};
use crate::reader::ReaderRegistry;
use crate::source::{MediaKind, UploadedFile};
use crate::urls::{extract_and_render, UrlListView};
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Status shown while a run is in progress
pub const PROCESSING_STATUS: &str = "Processing, please wait...";

/// Status shown for a media type no reader handles
pub const UNSUPPORTED_STATUS: &str = "Unsupported file type.";

/// Text display content when a run is started without a file
pub const NO_FILE_PROMPT: &str = "Please upload a file.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Idle,
    Processing,
    Done,
    Failed,
}

/// Everything a UI needs to draw: one status line and two output regions
#[derive(Debug, Clone, PartialEq, Default, Serialize, JsonSchema)]
pub struct ViewModel {
    pub state: RunState,
    /// Status line (empty after a successful run)
    pub status: String,
    /// Text display region
    pub text: String,
    /// URL list region
    pub urls: UrlListView,
    /// Name of the file behind the displayed text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Completion time of the last successful run (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

/// Routes files to source readers and owns the view model
#[derive(Clone)]
pub struct Dispatcher {
    readers: Arc<ReaderRegistry>,
    view: Arc<Mutex<ViewModel>>,
}

impl Dispatcher {
    pub fn new(readers: ReaderRegistry) -> Self {
        Self {
            readers: Arc::new(readers),
            view: Arc::new(Mutex::new(ViewModel::default())),
        }
    }

    /// Snapshot of the current view
    pub fn view(&self) -> ViewModel {
        self.view.lock().clone()
    }

    /// Text currently in the display region
    pub fn displayed_text(&self) -> String {
        self.view.lock().text.clone()
    }

    /// Process one file and return the resulting view.
    ///
    /// On error the view has already been updated with the status to show.
    /// The run is spawned, so it completes even if the caller stops waiting.
    pub async fn submit(&self, file: Option<UploadedFile>) -> Result<ViewModel> {
        let Some(file) = file else {
            self.view.lock().text = NO_FILE_PROMPT.to_string();
            return Err(Error::NoFile);
        };

        self.begin(&file)?;

        let readers = Arc::clone(&self.readers);
        let view = Arc::clone(&self.view);
        let task = tokio::spawn(async move { Self::run(readers, view, file).await });

        match task.await {
            Ok(result) => result,
            Err(e) => {
                let mut view = self.view.lock();
                view.state = RunState::Failed;
                view.status = format!("Error processing file: {}", e);
                Err(Error::Io(std::io::Error::other(e.to_string())))
            }
        }
    }

    /// Report a file that could not be loaded into a run.
    ///
    /// Displayed text and URLs are kept. An active run is left alone.
    pub fn reject(&self, err: &Error) {
        let mut view = self.view.lock();
        if view.state == RunState::Processing {
            return;
        }
        view.state = RunState::Failed;
        view.status = format!("Error processing file: {}", err);
    }

    /// Move to `Processing`, unless a run is already active.
    fn begin(&self, file: &UploadedFile) -> Result<()> {
        let mut view = self.view.lock();
        if view.state == RunState::Processing {
            warn!(name = %file.name, "Ignoring file submitted during an active run");
            return Err(Error::Busy);
        }
        view.state = RunState::Processing;
        view.status = PROCESSING_STATUS.to_string();
        info!(name = %file.name, media_type = %file.media_type, "Processing file");
        Ok(())
    }

    async fn run(
        readers: Arc<ReaderRegistry>,
        view: Arc<Mutex<ViewModel>>,
        file: UploadedFile,
    ) -> Result<ViewModel> {
        let kind = file.kind();
        let Some(reader) = readers.get(kind) else {
            let mut view = view.lock();
            view.state = RunState::Failed;
            view.status = UNSUPPORTED_STATUS.to_string();
            warn!(media_type = %file.media_type, "Unsupported file type");
            return Err(Error::UnsupportedMediaType {
                media_type: file.media_type,
            });
        };

        if let Some(status) = reader.progress_status() {
            view.lock().status = status.to_string();
        }

        let result = reader.read(&file).await;
        match result {
            Ok(extracted) => {
                let urls = extract_and_render(&extracted.content);
                let mut view = view.lock();
                view.text = extracted.display;
                view.urls = urls;
                view.status.clear();
                view.state = RunState::Done;
                view.file_name = Some(file.name);
                view.finished_at = Some(chrono::Utc::now().to_rfc3339());
                info!(
                    fragments = extracted.fragments,
                    urls = view.urls.entries().len(),
                    "Processing finished"
                );
                Ok(view.clone())
            }
            Err(e) => {
                warn!(error = %e, kind = %kind, "Source reader failed");
                let mut view = view.lock();
                view.state = RunState::Failed;
                view.status = format!("Error processing {}: {}", kind_label(kind), e);
                Err(e)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ReaderRegistry::default())
    }
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Pdf => "PDF",
        MediaKind::Image => "image",
        MediaKind::Text => "text",
        MediaKind::Unsupported => "file",
    }
}
