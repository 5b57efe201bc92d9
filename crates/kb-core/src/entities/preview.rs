use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// First rows of a tabular file as computed by the backend.
///
/// The client never interprets cell values beyond rendering them, so rows keep
/// whatever JSON the backend produced (strings, numbers, `null`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
}

impl PreviewTable {
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Render a cell for display. Missing cells and `null` yield `None`.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<String> {
        match self.rows.get(row)?.get(column)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
