use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::PreviewTable;
use crate::enums::FileOrigin;
use crate::ids::{PREFIX_FILE, generate_id};

/// A tabular file known to the workbench.
///
/// `datapoints` may only be present while both `server_filename` and
/// `selected_column` are set; extraction is always driven by a server-side
/// column. The local path is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub id: String,
    #[serde(rename = "source")]
    pub origin: FileOrigin,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_filename: Option<String>,
    #[serde(skip)]
    pub local_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PreviewTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datapoints: Option<Vec<String>>,
    #[serde(default)]
    pub selected: bool,
}

impl FileEntry {
    /// Entry for a file picked from the local machine.
    #[must_use]
    pub fn local(
        display_name: &str,
        local_path: PathBuf,
        server_filename: Option<String>,
        preview: Option<PreviewTable>,
    ) -> Self {
        Self {
            id: generate_id(PREFIX_FILE),
            origin: FileOrigin::Local,
            display_name: display_name.to_string(),
            server_filename,
            local_path: Some(local_path),
            preview,
            selected_column: None,
            datapoints: None,
            selected: true,
        }
    }

    /// Entry for a file the backend already stores.
    #[must_use]
    pub fn server(filename: &str, preview: Option<PreviewTable>) -> Self {
        Self {
            id: generate_id(PREFIX_FILE),
            origin: FileOrigin::Server,
            display_name: filename.to_string(),
            server_filename: Some(filename.to_string()),
            local_path: None,
            preview,
            selected_column: None,
            datapoints: None,
            selected: true,
        }
    }

    /// Name used to detect duplicates: the server filename, else the display name.
    #[must_use]
    pub fn lookup_name(&self) -> &str {
        self.server_filename.as_deref().unwrap_or(&self.display_name)
    }

    /// Server-backed but no preview yet.
    #[must_use]
    pub const fn needs_preview(&self) -> bool {
        self.server_filename.is_some() && self.preview.is_none()
    }

    /// Server-backed with a chosen column but no datapoints yet.
    #[must_use]
    pub const fn needs_datapoints(&self) -> bool {
        self.server_filename.is_some()
            && self.selected_column.is_some()
            && self.datapoints.is_none()
    }

    /// Choose (or clear, with `None`) the datapoint column.
    ///
    /// Any previously extracted datapoints belong to the old column and are
    /// dropped. Returns `false` if nothing changed.
    pub fn choose_column(&mut self, column: Option<String>) -> bool {
        let column = column.filter(|c| !c.is_empty());
        if self.selected_column == column {
            return false;
        }
        self.selected_column = column;
        self.datapoints = None;
        true
    }

    /// Attach datapoints extracted for `column`.
    ///
    /// Rejected (returns `false`) unless the entry is server-backed and
    /// `column` is still the chosen column.
    pub fn attach_datapoints(&mut self, column: &str, datapoints: Vec<String>) -> bool {
        if self.server_filename.is_none() || self.selected_column.as_deref() != Some(column) {
            return false;
        }
        self.datapoints = Some(datapoints);
        true
    }

    /// Drop datapoints the entry cannot hold: ones restored without a
    /// server filename or a chosen column. Returns `true` if any were dropped.
    pub fn normalize(&mut self) -> bool {
        let orphaned = self.server_filename.is_none() || self.selected_column.is_none();
        if orphaned && self.datapoints.is_some() {
            self.datapoints = None;
            return true;
        }
        false
    }
}
