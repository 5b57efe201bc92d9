//! # kb-client
//!
//! HTTP client for the knowledge workbench backend.
//!
//! Covers every route the workbench consumes:
//! - uploads: store files, list/preview/extract/delete stored files, ad hoc preview
//! - ontology: upload a `.ttl` graph, paginated entity/property listing
//! - regex: server-side pattern matching over datapoints
//! - database: connection test and SQL passthrough
//!
//! The pipeline talks to the backend through the [`Backend`] trait so tests
//! can substitute a scripted implementation.

pub mod database;
pub mod ontology;
pub mod regex;
pub mod uploads;

mod error;
mod http;

pub use database::{DbCredentials, QueryResult};
pub use error::BackendError;
pub use ontology::OntologyPage;
pub use uploads::UploadReport;

use std::path::{Path, PathBuf};
use std::time::Duration;

use kb_core::entities::{PreviewTable, RegexMatch};
use kb_core::enums::OntologyKind;

// ── Trait ──────────────────────────────────────────────────────────

/// Backend calls the workbench pipeline depends on.
///
/// All futures are awaited on a single task; implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Store local files server-side (`POST /upload-files`).
    async fn upload_files(&self, paths: &[PathBuf]) -> Result<Vec<UploadReport>, BackendError>;

    /// Preview a local file without storing it (`POST /preview`).
    async fn preview_file(&self, path: &Path) -> Result<PreviewTable, BackendError>;

    /// Preview a stored file (`GET /preview/upload`).
    async fn preview_upload(&self, filename: &str) -> Result<PreviewTable, BackendError>;

    /// Extract every value of `column` from a stored file (`POST /extract-upload`).
    async fn extract_upload(&self, filename: &str, column: &str)
    -> Result<Vec<String>, BackendError>;

    /// Delete a stored file (`DELETE /uploads/delete`).
    async fn delete_upload(&self, filename: &str) -> Result<(), BackendError>;

    /// Names of the stored files (`GET /uploads/list`).
    async fn list_uploads(&self) -> Result<Vec<String>, BackendError>;

    /// One page of an ontology listing (`GET /ontology/{kind}`).
    async fn list_ontology(
        &self,
        kind: OntologyKind,
        page: u32,
        limit: u32,
        query: &str,
    ) -> Result<OntologyPage, BackendError>;

    /// Match `regex` against `datapoints` server-side (`POST /regex/apply`).
    async fn apply_regex(
        &self,
        regex: &str,
        datapoints: &[String],
    ) -> Result<Vec<RegexMatch>, BackendError>;

    /// Replace the backend's ontology graph (`POST /upload-ontology`).
    async fn upload_ontology(&self, path: &Path) -> Result<serde_json::Value, BackendError>;
}

// ── Client ─────────────────────────────────────────────────────────

/// reqwest-backed [`Backend`] implementation.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    root: String,
}

impl BackendClient {
    /// Create a client for the backend rooted at `api_root`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api_root: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("kbw/0.1")
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            root: api_root.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized API root this client talks to.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.root)
    }
}

impl Backend for BackendClient {
    async fn upload_files(&self, paths: &[PathBuf]) -> Result<Vec<UploadReport>, BackendError> {
        self.upload_files(paths).await
    }

    async fn preview_file(&self, path: &Path) -> Result<PreviewTable, BackendError> {
        self.preview_file(path).await
    }

    async fn preview_upload(&self, filename: &str) -> Result<PreviewTable, BackendError> {
        self.preview_upload(filename).await
    }

    async fn extract_upload(
        &self,
        filename: &str,
        column: &str,
    ) -> Result<Vec<String>, BackendError> {
        self.extract_upload(filename, column).await
    }

    async fn delete_upload(&self, filename: &str) -> Result<(), BackendError> {
        self.delete_upload(filename).await
    }

    async fn list_uploads(&self) -> Result<Vec<String>, BackendError> {
        self.list_uploads().await
    }

    async fn list_ontology(
        &self,
        kind: OntologyKind,
        page: u32,
        limit: u32,
        query: &str,
    ) -> Result<OntologyPage, BackendError> {
        self.list_ontology(kind, page, limit, query).await
    }

    async fn apply_regex(
        &self,
        regex: &str,
        datapoints: &[String],
    ) -> Result<Vec<RegexMatch>, BackendError> {
        self.apply_regex(regex, datapoints).await
    }

    async fn upload_ontology(&self, path: &Path) -> Result<serde_json::Value, BackendError> {
        self.upload_ontology(path).await
    }
}
