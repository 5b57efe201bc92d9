use thiserror::Error;

/// Failures of the raw storage backends.
///
/// [`PersistedStore`](crate::PersistedStore) never surfaces these; they are
/// logged and replaced by defaults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage quota exceeded writing '{key}' ({needed} bytes, {available} available)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },
}
