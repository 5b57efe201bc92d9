//! Durable snapshot storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per snapshot key.
    /// Empty means `<data_dir>/kbw`.
    #[serde(default)]
    pub dir: String,
}

impl StorageConfig {
    /// Resolve the snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoStorageDir`] when `dir` is empty and the
    /// platform has no data directory.
    pub fn resolve_dir(&self) -> Result<PathBuf, ConfigError> {
        if !self.dir.is_empty() {
            return Ok(PathBuf::from(&self.dir));
        }
        dirs::data_dir()
            .map(|p| p.join("kbw"))
            .ok_or(ConfigError::NoStorageDir)
    }
}
