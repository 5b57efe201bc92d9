//! Backend REST service configuration.

use serde::{Deserialize, Serialize};

fn default_api_root() -> String {
    String::from("http://localhost:8000")
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Per-request timeout. Uploads of large sheets can be slow.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// The API root with any trailing slashes removed.
    #[must_use]
    pub fn normalized_root(&self) -> &str {
        self.api_root.trim_end_matches('/')
    }
}
