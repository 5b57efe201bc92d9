use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::RegexMatch;

/// Persisted regex state: the pattern and the last result set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct RegexSnapshot {
    pub q: String,
    pub results: Vec<RegexMatch>,
}

/// Persisted "last opened" server file and datapoint column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LastSelection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datapoint_column: Option<String>,
}
