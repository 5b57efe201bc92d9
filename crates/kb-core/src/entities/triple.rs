use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{PREFIX_TRIPLE, generate_id};

/// An instantiated subject–predicate–object statement. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Triple {
    pub id: String,
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl Triple {
    /// Build a triple with a fresh ID.
    #[must_use]
    pub fn new(subject: &str, predicate: &str, object: &str) -> Self {
        Self {
            id: generate_id(PREFIX_TRIPLE),
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
        }
    }
}

/// The subject/predicate/object currently being assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct TripleDraft {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

impl TripleDraft {
    /// True when every field is non-empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.subject.is_empty() && !self.predicate.is_empty() && !self.object.is_empty()
    }
}
