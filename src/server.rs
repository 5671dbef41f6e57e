//! MCP Server implementation using rmcp

use crate::dispatch::{Dispatcher, ViewModel};
use crate::export::{export, export_path, ExportedFile, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use crate::reader::{ReaderRegistry, TesseractCli};
use crate::source::{resolve_base64, resolve_path, UploadedFile};
use crate::urls::{extract, render, UrlListView};
use anyhow::Result;
use rmcp::{
    handler::server::tool::ToolRouter, handler::server::wrapper::Parameters, model::*,
    schemars::JsonSchema, service::RequestContext, tool, tool_handler, tool_router, RoleServer,
    ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// URI of the resource holding the currently displayed text
pub const EXTRACTED_TEXT_URI: &str = "session://extracted_text.txt";

/// File source specification
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum FileSource {
    /// File path (absolute or relative)
    Path {
        /// Path to the file
        path: String,
    },
    /// Base64 encoded file data
    Base64 {
        /// Base64 encoded file content
        base64: String,
    },
}

impl<'de> serde::Deserialize<'de> for FileSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Some(obj) = value.as_object() {
            if let Some(v) = obj.get("path") {
                if let Some(s) = v.as_str() {
                    return Ok(FileSource::Path {
                        path: s.to_string(),
                    });
                }
                return Err(serde::de::Error::custom("\"path\" must be a string"));
            }
            if let Some(v) = obj.get("base64") {
                if let Some(s) = v.as_str() {
                    return Ok(FileSource::Base64 {
                        base64: s.to_string(),
                    });
                }
                return Err(serde::de::Error::custom("\"base64\" must be a string"));
            }
            let keys: Vec<&String> = obj.keys().collect();
            Err(serde::de::Error::custom(format!(
                "Invalid source: expected an object with one of \"path\" or \"base64\", but got keys: {:?}",
                keys
            )))
        } else {
            Err(serde::de::Error::custom(format!(
                "Invalid source: expected an object with one of \"path\" or \"base64\", but got {}",
                match &value {
                    serde_json::Value::Array(_) => "an array",
                    serde_json::Value::String(_) => "a string",
                    serde_json::Value::Number(_) => "a number",
                    serde_json::Value::Bool(_) => "a boolean",
                    serde_json::Value::Null => "null",
                    _ => "unknown type",
                }
            )))
        }
    }
}

/// Security and resource configuration for the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directories files may be read from and exported to (empty: unrestricted)
    pub resource_dirs: Vec<String>,
    /// Directory `save_text` writes to when none is given (default: ".")
    pub export_dir: String,
    /// Tesseract executable used for images (default: "tesseract" on PATH)
    pub tesseract_binary: String,
    /// Maximum accepted file size in bytes (default: 100MB)
    pub max_upload_bytes: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            resource_dirs: Vec::new(),
            export_dir: ".".to_string(),
            tesseract_binary: "tesseract".to_string(),
            max_upload_bytes: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// URL extraction MCP server
#[derive(Clone)]
pub struct UrlServer {
    dispatcher: Dispatcher,
    tool_router: ToolRouter<Self>,
    /// Server configuration
    config: Arc<ServerConfig>,
}

// ============================================================================
// Request/Response types for process_file
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ProcessFileParams {
    /// File to process. Omitting it reproduces pressing "process" with no file chosen.
    #[serde(default)]
    pub source: Option<FileSource>,
    /// Declared media type (e.g. "application/pdf", "image/png", "text/plain").
    /// Guessed from the file name when omitted.
    #[serde(default)]
    pub media_type: Option<String>,
    /// File name, used for media type guessing of base64 sources
    #[serde(default)]
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ProcessFileResult {
    pub source: String,
    pub view: ViewModel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for save_text
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveTextParams {
    /// Directory to write extracted_text.txt into (default: server export directory)
    #[serde(default)]
    pub directory: Option<String>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct SaveTextResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<ExportedFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Request/Response types for extract_urls
// ============================================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractUrlsParams {
    /// Text to scan for URLs
    pub text: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ExtractUrlsResult {
    /// Raw matches in text order
    pub candidates: Vec<String>,
    /// Rendered link list
    pub urls: UrlListView,
}

// ============================================================================
// Tool implementations
// ============================================================================

#[tool_router]
impl UrlServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Create a new UrlServer with specified resource directories
    pub fn with_resource_dirs(dirs: Vec<String>) -> Self {
        Self::with_config(ServerConfig {
            resource_dirs: dirs,
            ..ServerConfig::default()
        })
    }

    /// Create a new UrlServer with full configuration
    pub fn with_config(config: ServerConfig) -> Self {
        let readers = ReaderRegistry::with_collaborators(
            Arc::new(crate::reader::PdfiumTextSource),
            Arc::new(TesseractCli::new(&config.tesseract_binary)),
        );
        Self::with_readers(config, readers)
    }

    /// Create a new UrlServer with custom source readers
    pub fn with_readers(config: ServerConfig, readers: ReaderRegistry) -> Self {
        Self {
            dispatcher: Dispatcher::new(readers),
            tool_router: Self::tool_router(),
            config: Arc::new(config),
        }
    }

    /// Extract text and URLs from a file
    #[tool(
        description = "Extract text and embedded URLs from a PDF, image (OCR), or plain text file. Returns the status line, the displayed text, and the URL list. Only one file is processed at a time; a file sent while another is processing is rejected.

Source format: {\"path\": \"/absolute/path.pdf\"} or {\"base64\": \"...\"}"
    )]
    async fn process_file(&self, Parameters(params): Parameters<ProcessFileParams>) -> String {
        let result = self.process_file_inner(&params).await;
        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    /// Show the current view
    #[tool(description = "Return the current status line, displayed text, and URL list.")]
    async fn get_view(&self) -> String {
        serde_json::to_string_pretty(&self.dispatcher.view()).unwrap_or_default()
    }

    /// Save the displayed text
    #[tool(
        description = "Save the currently displayed text as extracted_text.txt (text/plain) in the given directory."
    )]
    async fn save_text(&self, Parameters(params): Parameters<SaveTextParams>) -> String {
        let result = match self.process_save_text(&params) {
            Ok(file) => SaveTextResult {
                file: Some(file),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "save_text failed");
                SaveTextResult {
                    file: None,
                    error: Some(e.client_message()),
                }
            }
        };
        serde_json::to_string_pretty(&result).unwrap_or_default()
    }

    /// Find URLs in text
    #[tool(description = "Find URLs in the given text and return them with http:// added where no scheme is present.")]
    async fn extract_urls(&self, Parameters(params): Parameters<ExtractUrlsParams>) -> String {
        let candidates = extract(&params.text);
        let urls = render(&candidates);
        let result = ExtractUrlsResult { candidates, urls };
        serde_json::to_string_pretty(&result).unwrap_or_default()
    }
}

impl UrlServer {
    fn source_name(source: &FileSource) -> String {
        match source {
            FileSource::Path { path } => path.clone(),
            FileSource::Base64 { .. } => "<base64>".to_string(),
        }
    }

    /// Current view
    pub fn view(&self) -> ViewModel {
        self.dispatcher.view()
    }

    fn resolve_source(&self, params: &ProcessFileParams) -> crate::error::Result<Option<UploadedFile>> {
        let Some(source) = &params.source else {
            return Ok(None);
        };
        let file = match source {
            FileSource::Path { path } => {
                let path = self.validate_path_access(path)?;
                resolve_path(
                    path,
                    params.media_type.as_deref(),
                    self.config.max_upload_bytes,
                )?
            }
            FileSource::Base64 { base64 } => resolve_base64(
                base64,
                params.media_type.as_deref(),
                params.file_name.as_deref(),
                self.config.max_upload_bytes,
            )?,
        };
        Ok(Some(file))
    }

    pub async fn process_file_inner(&self, params: &ProcessFileParams) -> ProcessFileResult {
        let source = params
            .source
            .as_ref()
            .map(Self::source_name)
            .unwrap_or_default();

        let outcome = match self.resolve_source(params) {
            Ok(file) => self.dispatcher.submit(file).await,
            Err(e) => {
                self.dispatcher.reject(&e);
                Err(e)
            }
        };

        match outcome {
            Ok(view) => ProcessFileResult {
                source,
                view,
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = %e, "process_file failed");
                ProcessFileResult {
                    source,
                    view: self.dispatcher.view(),
                    error: Some(e.client_message()),
                }
            }
        }
    }

    pub fn process_save_text(&self, params: &SaveTextParams) -> crate::error::Result<ExportedFile> {
        let dir = params
            .directory
            .clone()
            .unwrap_or_else(|| self.config.export_dir.clone());
        let target = export_path(Path::new(&dir));
        self.validate_output_path_access(&target.to_string_lossy())?;

        let text = self.dispatcher.displayed_text();
        export(&text, Path::new(&dir))
    }

    /// Validate that a path is within allowed resource directories.
    /// If no resource_dirs are configured, all paths are allowed.
    fn validate_path_access(&self, path: &str) -> crate::error::Result<PathBuf> {
        if self.config.resource_dirs.is_empty() {
            return Ok(PathBuf::from(path));
        }

        let canonical = std::fs::canonicalize(path).map_err(|_| {
            crate::error::Error::PathAccessDenied {
                path: path.to_string(),
            }
        })?;

        for dir in &self.config.resource_dirs {
            if let Ok(canonical_dir) = std::fs::canonicalize(dir) {
                if canonical.starts_with(&canonical_dir) {
                    return Ok(canonical);
                }
            }
        }

        Err(crate::error::Error::PathAccessDenied {
            path: path.to_string(),
        })
    }

    /// Validate that an output path is within allowed resource directories.
    /// The nearest existing ancestor is canonicalized since the export directory may not exist yet.
    fn validate_output_path_access(&self, path: &str) -> crate::error::Result<PathBuf> {
        if self.config.resource_dirs.is_empty() {
            return Ok(PathBuf::from(path));
        }

        let denied = || crate::error::Error::PathAccessDenied {
            path: path.to_string(),
        };

        let path_obj = Path::new(path);
        let mut existing = path_obj.parent().unwrap_or(Path::new("."));
        let mut missing = Vec::new();
        loop {
            if existing.as_os_str().is_empty() {
                existing = Path::new(".");
            }
            if existing.exists() {
                break;
            }
            // `..` has no file name, so traversal through missing directories is denied here
            missing.push(existing.file_name().ok_or_else(denied)?);
            existing = existing.parent().ok_or_else(denied)?;
        }

        let mut canonical_target = std::fs::canonicalize(existing).map_err(|_| denied())?;
        for component in missing.iter().rev() {
            canonical_target.push(component);
        }
        canonical_target.push(path_obj.file_name().unwrap_or(std::ffi::OsStr::new("")));

        for dir in &self.config.resource_dirs {
            if let Ok(canonical_dir) = std::fs::canonicalize(dir) {
                if canonical_target.starts_with(&canonical_dir) {
                    return Ok(canonical_target);
                }
            }
        }

        Err(denied())
    }
}

impl Default for UrlServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for UrlServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "URL Extract MCP Server reads PDF, image, and plain text files, shows their text \
                 and the URLs found in it, and saves the text as extracted_text.txt. The \
                 currently displayed text is also exposed as a resource."
                    .into(),
            ),
        }
    }

    /// List the displayed text as a resource once there is any
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, ErrorData> {
        let view = self.dispatcher.view();
        let mut resources = Vec::new();

        if !view.text.is_empty() {
            let mut resource =
                RawResource::new(EXTRACTED_TEXT_URI.to_string(), EXPORT_FILE_NAME.to_string());
            resource.mime_type = Some(EXPORT_CONTENT_TYPE.to_string());
            resource.description = Some(format!(
                "Displayed text{}",
                view.file_name
                    .as_ref()
                    .map(|n| format!(" from {}", n))
                    .unwrap_or_default()
            ));
            resource.size = Some(view.text.len() as u32);

            resources.push(Annotated {
                raw: resource,
                annotations: None,
            });
        }

        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: Default::default(),
        })
    }

    /// Read the displayed text
    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, ErrorData> {
        if request.uri != EXTRACTED_TEXT_URI {
            return Err(ErrorData::invalid_params(
                format!("Unknown resource: {}", request.uri),
                None,
            ));
        }

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: request.uri.clone(),
                mime_type: Some(EXPORT_CONTENT_TYPE.to_string()),
                text: self.dispatcher.displayed_text(),
                meta: Default::default(),
            }],
        })
    }
}

/// Run the MCP server without resource directories
pub async fn run_server() -> Result<()> {
    run_server_with_config(ServerConfig::default()).await
}

/// Run the MCP server with specified resource directories
pub async fn run_server_with_dirs(resource_dirs: Vec<String>) -> Result<()> {
    run_server_with_config(ServerConfig {
        resource_dirs,
        ..ServerConfig::default()
    })
    .await
}

/// Run the MCP server with full configuration
pub async fn run_server_with_config(config: ServerConfig) -> Result<()> {
    let server = UrlServer::with_config(config);

    tracing::info!("URL Extract MCP Server ready, waiting for connections...");

    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RunState;
    use base64::Engine;
    use pretty_assertions::assert_eq;

    fn fixture_path(name: &str) -> PathBuf {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests/fixtures");
        path.push(name);
        path
    }

    fn fixtures_dir() -> PathBuf {
        let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        p.push("tests/fixtures");
        p
    }

    fn path_params(path: &Path) -> ProcessFileParams {
        ProcessFileParams {
            source: Some(FileSource::Path {
                path: path.to_string_lossy().to_string(),
            }),
            media_type: None,
            file_name: None,
        }
    }

    #[test]
    fn test_source_name() {
        assert_eq!(
            UrlServer::source_name(&FileSource::Path {
                path: "/test.txt".to_string()
            }),
            "/test.txt"
        );
        assert_eq!(
            UrlServer::source_name(&FileSource::Base64 {
                base64: "SGVsbG8=".to_string()
            }),
            "<base64>"
        );
    }

    #[test]
    fn test_file_source_deserialization() {
        let source: FileSource = serde_json::from_str(r#"{"path": "/test.pdf"}"#).unwrap();
        assert!(matches!(source, FileSource::Path { .. }));

        let source: FileSource = serde_json::from_str(r#"{"base64": "JVBERi0xLjQ="}"#).unwrap();
        assert!(matches!(source, FileSource::Base64 { .. }));

        let err = serde_json::from_str::<FileSource>(r#"{"url": "https://x.io"}"#).unwrap_err();
        assert!(err.to_string().contains("got keys"));

        let err = serde_json::from_str::<FileSource>(r#""/test.pdf""#).unwrap_err();
        assert!(err.to_string().contains("a string"));

        let err = serde_json::from_str::<FileSource>(r#"{"path": 3}"#).unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_params_deserialization() {
        let params: ProcessFileParams =
            serde_json::from_str(r#"{"source": {"base64": "SGVsbG8="}, "file_name": "a.txt"}"#)
                .unwrap();
        assert!(params.source.is_some());
        assert_eq!(params.file_name.as_deref(), Some("a.txt"));
        assert!(params.media_type.is_none());

        let params: ProcessFileParams = serde_json::from_str("{}").unwrap();
        assert!(params.source.is_none());
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert!(config.resource_dirs.is_empty());
        assert_eq!(config.export_dir, ".");
        assert_eq!(config.tesseract_binary, "tesseract");
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
    }

    #[tokio::test]
    async fn test_process_text_fixture() {
        let server = UrlServer::new();
        let result = server
            .process_file_inner(&path_params(&fixture_path("contact.txt")))
            .await;

        assert!(result.error.is_none());
        assert_eq!(result.view.state, RunState::Done);
        assert!(result.view.text.starts_with("Extracted Text:\n"));
        assert_eq!(
            result.view.urls.hrefs(),
            vec!["http://foo.com", "https://foo.com/help."]
        );
    }

    #[tokio::test]
    async fn test_process_base64_with_file_name() {
        let server = UrlServer::new();
        let encoded = base64::engine::general_purpose::STANDARD.encode("docs at www.b.net/path");
        let params = ProcessFileParams {
            source: Some(FileSource::Base64 { base64: encoded }),
            media_type: None,
            file_name: Some("notes.txt".to_string()),
        };

        let result = server.process_file_inner(&params).await;
        assert!(result.error.is_none());
        assert_eq!(result.source, "<base64>");
        assert_eq!(result.view.urls.hrefs(), vec!["http://www.b.net/path"]);
    }

    #[tokio::test]
    async fn test_process_without_source() {
        let server = UrlServer::new();
        let params = ProcessFileParams {
            source: None,
            media_type: None,
            file_name: None,
        };

        let result = server.process_file_inner(&params).await;
        assert_eq!(result.error.as_deref(), Some("Please upload a file."));
        assert_eq!(result.view.text, "Please upload a file.");
        assert_eq!(result.view.state, RunState::Idle);
    }

    #[tokio::test]
    async fn test_process_unsupported_type() {
        let server = UrlServer::new();
        let encoded = base64::engine::general_purpose::STANDARD.encode([0u8, 1, 2]);
        let params = ProcessFileParams {
            source: Some(FileSource::Base64 { base64: encoded }),
            media_type: Some("application/zip".to_string()),
            file_name: None,
        };

        let result = server.process_file_inner(&params).await;
        assert_eq!(result.error.as_deref(), Some("Unsupported file type."));
        assert_eq!(result.view.state, RunState::Failed);
        assert_eq!(result.view.status, "Unsupported file type.");
    }

    #[tokio::test]
    async fn test_process_invalid_pdf_reports_status() {
        let server = UrlServer::new();
        let encoded = base64::engine::general_purpose::STANDARD.encode("not a pdf");
        let params = ProcessFileParams {
            source: Some(FileSource::Base64 { base64: encoded }),
            media_type: Some("application/pdf".to_string()),
            file_name: None,
        };

        let result = server.process_file_inner(&params).await;
        assert!(result.error.is_some());
        assert_eq!(result.view.state, RunState::Failed);
        assert!(result.view.status.starts_with("Error processing PDF: "));
    }

    #[tokio::test]
    async fn test_process_missing_file() {
        let server = UrlServer::new();
        let result = server
            .process_file_inner(&path_params(Path::new("/nonexistent/links.txt")))
            .await;
        assert_eq!(result.error.as_deref(), Some("File not found"));
        assert_eq!(result.view.state, RunState::Failed);
        assert_eq!(
            result.view.status,
            "Error processing file: File not found: /nonexistent/links.txt"
        );
    }

    #[tokio::test]
    async fn test_process_bad_base64_reports_status() {
        let server = UrlServer::new();
        let params = ProcessFileParams {
            source: Some(FileSource::Base64 {
                base64: "not base64!!".to_string(),
            }),
            media_type: Some("text/plain".to_string()),
            file_name: None,
        };

        let result = server.process_file_inner(&params).await;
        assert_eq!(result.error.as_deref(), Some("Invalid base64 data"));
        let view = server.view();
        assert_eq!(view.state, RunState::Failed);
        assert!(view
            .status
            .starts_with("Error processing file: Invalid base64 data: "));
        assert_eq!(view.text, "");
    }

    #[tokio::test]
    async fn test_save_text_writes_displayed_text() {
        let server = UrlServer::new();
        server
            .process_file_inner(&path_params(&fixture_path("contact.txt")))
            .await;

        let dir = tempfile::tempdir().unwrap();
        let exported = server
            .process_save_text(&SaveTextParams {
                directory: Some(dir.path().to_string_lossy().to_string()),
            })
            .unwrap();

        let written = std::fs::read_to_string(&exported.path).unwrap();
        assert_eq!(written, server.view().text);
        assert!(exported.path.ends_with("extracted_text.txt"));
    }

    #[tokio::test]
    async fn test_extract_urls_tool_output() {
        let server = UrlServer::new();
        let json = server
            .extract_urls(Parameters(ExtractUrlsParams {
                text: "http://a.io and www.b.net/path?x=1".to_string(),
            }))
            .await;
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["candidates"][0], "http://a.io");
        assert_eq!(value["candidates"][1], "www.b.net/path?x=1");
        assert_eq!(value["urls"]["entries"][1]["href"], "http://www.b.net/path?x=1");
    }

    // ========================================================================
    // Path sandboxing tests
    // ========================================================================

    #[test]
    fn test_validate_path_no_resource_dirs_allows_all() {
        let server = UrlServer::new();
        let result = server.validate_path_access(&fixture_path("contact.txt").to_string_lossy());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_path_within_resource_dir() {
        let server =
            UrlServer::with_resource_dirs(vec![fixtures_dir().to_string_lossy().to_string()]);
        let result = server.validate_path_access(&fixture_path("contact.txt").to_string_lossy());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_path_outside_resource_dir_denied() {
        let server =
            UrlServer::with_resource_dirs(vec![fixtures_dir().to_string_lossy().to_string()]);
        // Cargo.toml is outside tests/fixtures
        let cargo_toml = {
            let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            p.push("Cargo.toml");
            p
        };
        let result = server.validate_path_access(&cargo_toml.to_string_lossy());
        assert!(matches!(
            result,
            Err(crate::error::Error::PathAccessDenied { .. })
        ));
    }

    #[test]
    fn test_validate_path_traversal_denied() {
        let server =
            UrlServer::with_resource_dirs(vec![fixtures_dir().to_string_lossy().to_string()]);
        let traversal = format!("{}/../../Cargo.toml", fixtures_dir().to_string_lossy());
        let result = server.validate_path_access(&traversal);
        assert!(matches!(
            result,
            Err(crate::error::Error::PathAccessDenied { .. })
        ));
    }

    #[test]
    fn test_validate_output_path_within_resource_dir() {
        let dir = tempfile::tempdir().unwrap();
        let server =
            UrlServer::with_resource_dirs(vec![dir.path().to_string_lossy().to_string()]);
        let target = dir.path().join("new/sub").join(EXPORT_FILE_NAME);
        assert!(server
            .validate_output_path_access(&target.to_string_lossy())
            .is_ok());
    }

    #[test]
    fn test_validate_output_path_outside_denied() {
        let allowed = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let server =
            UrlServer::with_resource_dirs(vec![allowed.path().to_string_lossy().to_string()]);
        let target = other.path().join(EXPORT_FILE_NAME);
        assert!(matches!(
            server.validate_output_path_access(&target.to_string_lossy()),
            Err(crate::error::Error::PathAccessDenied { .. })
        ));
    }

    #[test]
    fn test_validate_output_path_traversal_in_missing_dirs_denied() {
        let allowed = tempfile::tempdir().unwrap();
        let server =
            UrlServer::with_resource_dirs(vec![allowed.path().to_string_lossy().to_string()]);
        let target = allowed
            .path()
            .join("missing/../../escape")
            .join(EXPORT_FILE_NAME);
        assert!(server
            .validate_output_path_access(&target.to_string_lossy())
            .is_err());
    }
}
