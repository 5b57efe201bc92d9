use kb_core::entities::{FileEntry, RegexMatch};
use kb_core::enums::FileOrigin;
use kb_workbench::{RegexFilter, RegexOutcome};
use serde::Serialize;

/// One registry entry as listed by the CLI.
#[derive(Debug, Serialize)]
pub struct FileSummary {
    pub id: String,
    pub name: String,
    pub origin: FileOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_filename: Option<String>,
    pub selected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// `None` while the preview is missing.
    pub columns: Option<Vec<String>>,
    /// `None` while datapoints are missing.
    pub datapoints: Option<usize>,
}

impl From<&FileEntry> for FileSummary {
    fn from(entry: &FileEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.display_name.clone(),
            origin: entry.origin,
            server_filename: entry.server_filename.clone(),
            selected: entry.selected,
            column: entry.selected_column.clone(),
            columns: entry.preview.as_ref().map(|p| p.columns.clone()),
            datapoints: entry.datapoints.as_ref().map(Vec::len),
        }
    }
}

pub fn summarize(entries: &[FileEntry]) -> Vec<FileSummary> {
    entries.iter().map(FileSummary::from).collect()
}

/// Regex state plus, when a run happened, its outcome.
#[derive(Debug, Serialize)]
pub struct RegexResponse {
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RegexOutcome>,
    pub columns: Vec<String>,
    pub matches: Vec<RegexMatch>,
}

impl RegexResponse {
    pub fn new(filter: &RegexFilter, outcome: Option<RegexOutcome>) -> Self {
        Self {
            pattern: filter.pattern(),
            outcome,
            columns: filter.group_columns(),
            matches: filter.results(),
        }
    }
}
