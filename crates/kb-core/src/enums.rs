//! Enums shared across the workbench.
//!
//! All enums use lowercase serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// FileOrigin
// ---------------------------------------------------------------------------

/// Where a file's bytes came from when it entered the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FileOrigin {
    /// Picked from the local machine and uploaded in this session.
    Local,
    /// Added from the list of files already stored by the backend.
    Server,
}

impl FileOrigin {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OntologyKind
// ---------------------------------------------------------------------------

/// Which ontology listing an autocomplete widget searches.
///
/// `Entities` is the merged class + instance listing used for subjects and
/// objects; `Properties` feeds the predicate picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OntologyKind {
    Entities,
    Properties,
    Classes,
    Instances,
}

impl OntologyKind {
    /// Path segment under `/ontology/`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Properties => "properties",
            Self::Classes => "classes",
            Self::Instances => "instances",
        }
    }
}

impl fmt::Display for OntologyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OntologyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entities" | "entity" => Ok(Self::Entities),
            "properties" | "property" | "predicates" => Ok(Self::Properties),
            "classes" | "class" => Ok(Self::Classes),
            "instances" | "instance" => Ok(Self::Instances),
            _ => Err(CoreError::UnknownVariant {
                kind: "ontology kind",
                value: s.to_string(),
            }),
        }
    }
}
