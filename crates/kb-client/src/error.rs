//! Backend error types.

use thiserror::Error;

/// Errors that can occur when talking to the workbench backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// The `detail` field of the error body, or the raw body.
        message: String,
    },

    /// Backend answered `ok: false` (or omitted `ok`).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A local file could not be read for upload.
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
