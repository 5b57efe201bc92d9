//! Cross-cutting error types for the workbench.
//!
//! Domain-specific errors (e.g., `BackendError`, `StoreError`) are defined in
//! their respective crates. Everything converges into `anyhow` in `kb-cli`.

use thiserror::Error;

/// Errors that can be raised by any workbench crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A string could not be parsed into a known enum value.
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Data failed validation (shape, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
