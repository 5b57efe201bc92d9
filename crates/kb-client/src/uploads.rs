//! Stored-file routes: upload, list, preview, extract, delete.

use std::path::{Path, PathBuf};

use kb_core::entities::PreviewTable;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use crate::http::{into_payload, into_table, send_json};
use crate::{BackendClient, error::BackendError};

/// One line of the upload report: original name and where the backend stored it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub filename: String,
    #[serde(default)]
    pub saved_to: Option<String>,
}

impl UploadReport {
    /// The name the backend knows the file by: basename of `saved_to`,
    /// falling back to the original filename.
    #[must_use]
    pub fn server_name(&self) -> &str {
        self.saved_to
            .as_deref()
            .and_then(|p| p.rsplit(['/', '\\']).next())
            .filter(|base| !base.is_empty())
            .unwrap_or(&self.filename)
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    report: Vec<UploadReport>,
}

#[derive(Deserialize)]
struct ListResponse {
    files: Vec<StoredFile>,
}

#[derive(Deserialize)]
struct StoredFile {
    filename: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    datapoints: Vec<String>,
}

/// Display name of a local path (its final component).
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Read a local file into a multipart part named after the file.
pub(crate) async fn file_part(path: &Path) -> Result<Part, BackendError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| BackendError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Part::bytes(bytes).file_name(file_name(path)))
}

impl BackendClient {
    /// Store local files on the backend.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if a file cannot be read, the request fails,
    /// or the backend rejects the upload.
    pub async fn upload_files(&self, paths: &[PathBuf]) -> Result<Vec<UploadReport>, BackendError> {
        let mut form = Form::new();
        for path in paths {
            form = form.part("files", file_part(path).await?);
        }
        let value = send_json(self.http.post(self.url("/upload-files")).multipart(form)).await?;
        let data: UploadResponse = into_payload(value)?;
        tracing::debug!(count = data.report.len(), "upload report received");
        Ok(data.report)
    }

    /// Preview the first rows of a local file without storing it.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the file cannot be read, the request fails,
    /// or the backend does not answer with a table.
    pub async fn preview_file(&self, path: &Path) -> Result<PreviewTable, BackendError> {
        let form = Form::new().part("file", file_part(path).await?);
        let value = send_json(self.http.post(self.url("/preview")).multipart(form)).await?;
        into_table(value)
    }

    /// Preview the first rows of a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the backend does not
    /// answer with a table.
    pub async fn preview_upload(&self, filename: &str) -> Result<PreviewTable, BackendError> {
        let url = self.url(&format!(
            "/preview/upload?filename={}",
            urlencoding::encode(filename)
        ));
        into_table(send_json(self.http.get(&url)).await?)
    }

    /// Extract all non-null values of `column` from a stored file, as strings.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the column is unknown.
    pub async fn extract_upload(
        &self,
        filename: &str,
        column: &str,
    ) -> Result<Vec<String>, BackendError> {
        let form = Form::new()
            .text("filename", filename.to_string())
            .text("column", column.to_string());
        let value = send_json(self.http.post(self.url("/extract-upload")).multipart(form)).await?;
        let data: ExtractResponse = into_payload(value)?;
        Ok(data.datapoints)
    }

    /// Delete a stored file.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the file does not exist.
    pub async fn delete_upload(&self, filename: &str) -> Result<(), BackendError> {
        let url = self.url(&format!(
            "/uploads/delete?filename={}",
            urlencoding::encode(filename)
        ));
        let value = send_json(self.http.delete(&url)).await?;
        into_payload::<serde::de::IgnoredAny>(value)?;
        Ok(())
    }

    /// Names of all stored tabular files.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the request fails or the response is malformed.
    pub async fn list_uploads(&self) -> Result<Vec<String>, BackendError> {
        let value = send_json(self.http.get(self.url("/uploads/list"))).await?;
        let data: ListResponse = into_payload(value)?;
        Ok(data.files.into_iter().map(|f| f.filename).collect())
    }
}
