//! # kb-config
//!
//! Layered configuration loading for the knowledge workbench using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`KBW_*` prefix, `__` as separator)
//! 2. Project-level `.kbw/config.toml`
//! 3. User-level `~/.config/kbw/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `KBW_BACKEND__API_ROOT` -> `backend.api_root`,
//! `KBW_SEARCH__DEBOUNCE_MS` -> `search.debounce_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use kb_config::KbConfig;
//!
//! let config = KbConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.backend.normalized_root());
//! ```

mod backend;
mod error;
mod search;
mod storage;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use search::SearchConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KbConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl KbConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".kbw/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("KBW_").split("__"))
    }

    /// Reject values the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty API root or a zero page limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.normalized_root().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "backend.api_root".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.search.page_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.page_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kbw").join("config.toml"))
    }
}
