//! Ontology autocomplete settings.

use serde::{Deserialize, Serialize};

const fn default_debounce_ms() -> u64 {
    250
}

const fn default_page_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Settling delay between the last keystroke and the request.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Items per page requested from the ontology listing.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_limit: default_page_limit(),
        }
    }
}
