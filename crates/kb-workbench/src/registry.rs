//! The ordered list of files the workbench knows about.
//!
//! Entry order is append-on-create, preserve-on-update, remove-on-delete.
//! Network work for new entries happens in [`build_local_entries`] and
//! [`build_server_entries`], which do not borrow the registry; the results
//! are appended afterwards so creation order never depends on which request
//! finished first.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use futures::future::join_all;
use kb_client::{Backend, UploadReport};
use kb_core::entities::{FileEntry, PreviewTable};
use kb_core::ids::{PREFIX_FILE, reissue_if_taken};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileRegistry {
    entries: Vec<FileEntry>,
}

impl FileRegistry {
    /// Build from restored entries. Datapoints an entry cannot hold are
    /// dropped and repeated IDs are reissued.
    #[must_use]
    pub fn new(entries: Vec<FileEntry>) -> Self {
        let mut registry = Self::default();
        for mut entry in entries {
            if entry.normalize() {
                tracing::warn!(
                    file = entry.lookup_name(),
                    "dropping datapoints without a server file and column"
                );
            }
            registry.push(entry);
        }
        registry
    }

    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.entries.iter().filter(|e| e.selected).count()
    }

    /// Whether an entry already answers to `name` (server filename, else display name).
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.lookup_name() == name)
    }

    /// Append entries in order. Returns their IDs.
    pub fn append(&mut self, entries: Vec<FileEntry>) -> Vec<String> {
        entries.into_iter().map(|e| self.push(e)).collect()
    }

    /// Append entries whose name is not registered yet; duplicates are skipped.
    pub fn append_unique(&mut self, entries: Vec<FileEntry>) -> Vec<String> {
        let mut ids = Vec::new();
        for entry in entries {
            if self.contains_name(entry.lookup_name()) {
                tracing::debug!(file = entry.lookup_name(), "already registered, skipping");
                continue;
            }
            ids.push(self.push(entry));
        }
        ids
    }

    /// Append one entry, reissuing its ID if another entry already has it.
    fn push(&mut self, mut entry: FileEntry) -> String {
        if reissue_if_taken(&mut entry.id, PREFIX_FILE, |id| self.get(id).is_some()) {
            tracing::debug!(file = entry.lookup_name(), id = %entry.id, "reissued colliding id");
        }
        let id = entry.id.clone();
        self.entries.push(entry);
        id
    }

    /// Mutate one entry in place. `f` reports whether it changed anything.
    /// Returns `false` for unknown IDs.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut FileEntry) -> bool) -> bool {
        self.entries.iter_mut().find(|e| e.id == id).is_some_and(f)
    }

    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        self.update(id, |entry| {
            let changed = entry.selected != selected;
            entry.selected = selected;
            changed
        })
    }

    /// Choose the datapoint column; `None` or `""` clears it.
    pub fn set_column(&mut self, id: &str, column: Option<String>) -> bool {
        self.update(id, |entry| entry.choose_column(column))
    }

    /// Attach a preview unless the entry already has one.
    pub fn attach_preview(&mut self, id: &str, preview: PreviewTable) -> bool {
        self.update(id, |entry| {
            if entry.preview.is_some() {
                return false;
            }
            entry.preview = Some(preview);
            true
        })
    }

    /// Attach datapoints extracted for `column`; ignored if the column has
    /// changed since the request was made.
    pub fn attach_datapoints(&mut self, id: &str, column: &str, datapoints: Vec<String>) -> bool {
        self.update(id, |entry| entry.attach_datapoints(column, datapoints))
    }

    pub fn remove(&mut self, id: &str) -> Option<FileEntry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }
}

/// Upload local files, preview each one, and build their entries.
///
/// One entry is produced per input path, in input order, whether or not the
/// upload or preview succeeded; failures are logged and left for
/// rehydration to repair.
pub async fn build_local_entries<B: Backend>(backend: &B, paths: &[PathBuf]) -> Vec<FileEntry> {
    if paths.is_empty() {
        tracing::debug!("no files provided");
        return Vec::new();
    }
    tracing::debug!(count = paths.len(), "uploading files");

    let report = backend.upload_files(paths).await.unwrap_or_else(|error| {
        tracing::warn!(%error, "upload failed; entries stay local-only");
        Vec::new()
    });
    let saved = saved_names(&report);

    let previews = join_all(paths.iter().map(|path| async move {
        match backend.preview_file(path).await {
            Ok(table) => {
                tracing::debug!(
                    file = %path.display(),
                    columns = table.columns.len(),
                    rows = table.rows.len(),
                    "preview ready"
                );
                Some(table)
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), %error, "preview failed");
                None
            }
        }
    }))
    .await;

    paths
        .iter()
        .zip(previews)
        .map(|(path, preview)| {
            let name = display_name(path);
            let server_filename = saved.get(name.as_str()).map(|s| (*s).to_string());
            FileEntry::local(&name, path.clone(), server_filename, preview)
        })
        .collect()
}

/// Preview stored files not yet registered and build `server` entries.
///
/// Names already present in `registry` (or repeated in `filenames`) are
/// skipped. A failed preview still yields an entry.
pub async fn build_server_entries<B: Backend>(
    backend: &B,
    registry: &FileRegistry,
    filenames: &[String],
) -> Vec<FileEntry> {
    let mut seen = HashSet::new();
    let picks: Vec<&String> = filenames
        .iter()
        .filter(|name| !registry.contains_name(name) && seen.insert(name.as_str()))
        .collect();

    let previews = join_all(picks.iter().map(|name| async move {
        match backend.preview_upload(name).await {
            Ok(table) => Some(table),
            Err(error) => {
                tracing::warn!(file = %name, %error, "preview failed");
                None
            }
        }
    }))
    .await;

    picks
        .into_iter()
        .zip(previews)
        .map(|(name, preview)| FileEntry::server(name, preview))
        .collect()
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

/// Server names from an upload report, keyed by original filename.
#[must_use]
pub fn saved_names(report: &[UploadReport]) -> HashMap<&str, &str> {
    report
        .iter()
        .map(|r| (r.filename.as_str(), r.server_name()))
        .collect()
}
