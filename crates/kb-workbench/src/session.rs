//! The owned workbench session and its dispatch pipeline.
//!
//! Every registry mutation ends in [`Workbench::dispatch`], which runs the
//! downstream steps in one fixed order:
//!
//! 1. persist the registry
//! 2. one rehydration round (merges from it do not start another)
//! 3. recompute the combined datapoints
//! 4. re-run the regex filter if the combined set changed
//! 5. persist the regex snapshot

use std::path::{Path, PathBuf};

use kb_client::Backend;
use kb_core::entities::{FileEntry, LastSelection, PreviewTable, RegexMatch, Triple, TripleDraft};
use kb_core::enums::OntologyKind;
use kb_store::PersistedStore;
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::regex_filter::{RegexFilter, RegexOutcome};
use crate::registry::{FileRegistry, build_local_entries, build_server_entries};
use crate::rehydrate::{RepairPlan, RepairReport};
use crate::search::{FetchOutcome, SearchController, SearchSettings};
use crate::triples::{TripleBuilder, TripleSlot};

/// What changed in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Loaded,
    Added(Vec<String>),
    SelectionChanged(String),
    /// The column changed; `extracted` when extraction was already tried.
    ColumnChanged { id: String, extracted: bool },
    Removed(String),
    /// Explicit resync; also forces a regex re-run.
    Sync,
}

/// What one pass of the pipeline did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    pub repair: RepairReport,
    pub datapoints: usize,
    pub datapoints_changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regex: Option<RegexOutcome>,
}

pub struct Workbench<B: Backend> {
    backend: B,
    store: PersistedStore,
    registry: FileRegistry,
    datapoints: Vec<String>,
    regex: RegexFilter,
    builder: TripleBuilder,
    subject_search: SearchController,
    predicate_search: SearchController,
    object_search: SearchController,
    uploads: Vec<String>,
    last_selection: LastSelection,
    server_preview: Option<PreviewTable>,
    ontology_revision: u64,
}

impl<B: Backend> Workbench<B> {
    /// Restore the session from `store`. No backend calls are made.
    pub fn open(backend: B, store: PersistedStore, search: SearchSettings) -> Self {
        let registry = FileRegistry::new(store.load_files());
        let datapoints = aggregate(registry.entries());
        tracing::debug!(
            files = registry.len(),
            datapoints = datapoints.len(),
            "session restored"
        );
        Self {
            regex: RegexFilter::new(store.load_regex()),
            builder: TripleBuilder::new(store.load_draft(), store.load_triples()),
            last_selection: store.load_last_selection(),
            subject_search: SearchController::new(OntologyKind::Entities, search),
            predicate_search: SearchController::new(OntologyKind::Properties, search),
            object_search: SearchController::new(OntologyKind::Entities, search),
            backend,
            store,
            registry,
            datapoints,
            uploads: Vec::new(),
            server_preview: None,
            ontology_revision: 0,
        }
    }

    /// Startup work: list stored files, restore the last server preview,
    /// and run the pipeline once.
    pub async fn start(&mut self) -> PipelineReport {
        self.refresh_uploads().await;
        if let Some(name) = self.last_selection.server_file.clone() {
            self.load_server_preview(&name).await;
        }
        self.dispatch(RegistryEvent::Loaded).await
    }

    // ── Accessors ──────────────────────────────────────────────────

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn files(&self) -> &[FileEntry] {
        self.registry.entries()
    }

    pub fn file(&self, id: &str) -> Option<&FileEntry> {
        self.registry.get(id)
    }

    /// Combined datapoints across selected files.
    pub fn datapoints(&self) -> &[String] {
        &self.datapoints
    }

    pub fn available_uploads(&self) -> &[String] {
        &self.uploads
    }

    pub const fn last_selection(&self) -> &LastSelection {
        &self.last_selection
    }

    pub const fn server_preview(&self) -> Option<&PreviewTable> {
        self.server_preview.as_ref()
    }

    pub const fn regex(&self) -> &RegexFilter {
        &self.regex
    }

    pub fn regex_results(&self) -> Vec<RegexMatch> {
        self.regex.results()
    }

    pub const fn draft(&self) -> &TripleDraft {
        self.builder.draft()
    }

    pub fn triples(&self) -> &[Triple] {
        self.builder.triples()
    }

    pub const fn ontology_revision(&self) -> u64 {
        self.ontology_revision
    }

    /// The autocomplete feeding `slot`.
    pub const fn search(&self, slot: TripleSlot) -> &SearchController {
        match slot {
            TripleSlot::Subject => &self.subject_search,
            TripleSlot::Predicate => &self.predicate_search,
            TripleSlot::Object => &self.object_search,
        }
    }

    // ── Registry operations ────────────────────────────────────────

    /// Upload and register local files, one entry per path.
    pub async fn add_local(&mut self, paths: &[PathBuf]) -> PipelineReport {
        let entries = build_local_entries(&self.backend, paths).await;
        let ids = self.registry.append(entries);
        tracing::info!(count = ids.len(), "added local files");
        self.dispatch(RegistryEvent::Added(ids)).await
    }

    /// Register files the backend already stores. Known names are skipped.
    pub async fn add_existing(&mut self, filenames: &[String]) -> PipelineReport {
        let entries = build_server_entries(&self.backend, &self.registry, filenames).await;
        let ids = self.registry.append_unique(entries);
        tracing::info!(count = ids.len(), "added server files");
        self.dispatch(RegistryEvent::Added(ids)).await
    }

    /// Include or exclude a file from the combined datapoints.
    /// `None` for unknown IDs or no change.
    pub async fn set_selected(&mut self, id: &str, selected: bool) -> Option<PipelineReport> {
        if !self.registry.set_selected(id, selected) {
            return None;
        }
        tracing::debug!(id, selected, "selection changed");
        Some(self.dispatch(RegistryEvent::SelectionChanged(id.to_string())).await)
    }

    /// Choose the datapoint column of a file and extract it right away.
    /// An empty column clears the choice.
    pub async fn set_column(&mut self, id: &str, column: &str) -> Option<PipelineReport> {
        let column = (!column.is_empty()).then(|| column.to_string());
        if !self.registry.set_column(id, column.clone()) {
            return None;
        }
        tracing::debug!(id, column = ?column, "column changed");

        let target = self.registry.get(id).and_then(|e| e.server_filename.clone());
        let extracted = match (target, column) {
            (Some(filename), Some(column)) => {
                match self.backend.extract_upload(&filename, &column).await {
                    Ok(dps) => {
                        tracing::info!(
                            file = %filename,
                            %column,
                            count = dps.len(),
                            "datapoints extracted"
                        );
                        self.registry.attach_datapoints(id, &column, dps);
                    }
                    Err(error) => {
                        tracing::warn!(file = %filename, %column, %error, "extraction failed");
                    }
                }
                true
            }
            _ => false,
        };
        Some(
            self.dispatch(RegistryEvent::ColumnChanged {
                id: id.to_string(),
                extracted,
            })
            .await,
        )
    }

    /// Forget a file locally. The server copy is untouched.
    pub async fn remove(&mut self, id: &str) -> Option<PipelineReport> {
        let removed = self.registry.remove(id)?;
        tracing::info!(file = removed.lookup_name(), "removed file");
        Some(self.dispatch(RegistryEvent::Removed(id.to_string())).await)
    }

    /// Delete a file's server copy; only on success is it removed locally.
    pub async fn remove_from_server(&mut self, id: &str) -> Option<PipelineReport> {
        let filename = self.registry.get(id)?.server_filename.clone()?;
        if let Err(error) = self.backend.delete_upload(&filename).await {
            tracing::warn!(file = %filename, %error, "server delete failed");
            return None;
        }
        tracing::info!(file = %filename, "deleted from server");
        self.registry.remove(id);
        self.refresh_uploads().await;
        Some(self.dispatch(RegistryEvent::Removed(id.to_string())).await)
    }

    /// Re-run repair and the downstream pipeline.
    pub async fn sync(&mut self) -> PipelineReport {
        self.dispatch(RegistryEvent::Sync).await
    }

    /// Run the pipeline for one registry change.
    pub async fn dispatch(&mut self, event: RegistryEvent) -> PipelineReport {
        tracing::debug!(
            ?event,
            total = self.registry.len(),
            selected = self.registry.selected_count(),
            "registry changed"
        );
        self.store.save_files(self.registry.entries());

        let mut plan = RepairPlan::for_registry(&self.registry);
        if let RegistryEvent::ColumnChanged { id, extracted: true } = &event {
            plan = plan.without_extraction(id);
        }
        let repair = if plan.is_empty() {
            RepairReport::default()
        } else {
            tracing::debug!(
                previews = plan.previews.len(),
                extractions = plan.extractions.len(),
                "rehydrating"
            );
            let report = plan.execute(&self.backend).await.apply(&mut self.registry);
            if report.changed() {
                self.store.save_files(self.registry.entries());
            }
            report
        };

        let datapoints = aggregate(self.registry.entries());
        let datapoints_changed = datapoints != self.datapoints;
        if datapoints_changed {
            tracing::info!(count = datapoints.len(), "combined datapoints changed");
        }
        self.datapoints = datapoints;

        let forced = matches!(event, RegistryEvent::Loaded | RegistryEvent::Sync);
        let regex = if datapoints_changed || forced {
            let outcome = self.regex.run(&self.backend, &self.datapoints).await;
            self.store.save_regex(&self.regex.snapshot());
            Some(outcome)
        } else {
            None
        };

        PipelineReport {
            repair,
            datapoints: self.datapoints.len(),
            datapoints_changed,
            regex,
        }
    }

    // ── Stored files and last selection ────────────────────────────

    /// Refresh the list of stored files. Failure keeps the previous list.
    pub async fn refresh_uploads(&mut self) -> bool {
        match self.backend.list_uploads().await {
            Ok(files) => {
                tracing::debug!(count = files.len(), "uploads listed");
                self.uploads = files;
                true
            }
            Err(error) => {
                tracing::warn!(%error, "listing uploads failed");
                false
            }
        }
    }

    /// Remember `name` as the opened server file and fetch its preview.
    pub async fn select_server_file(&mut self, name: &str) -> bool {
        self.last_selection.server_file = Some(name.to_string());
        self.store.save_last_selection(&self.last_selection);
        self.load_server_preview(name).await
    }

    /// Remember the datapoint column chosen for the opened server file.
    pub fn set_datapoint_column(&mut self, column: &str) {
        self.last_selection.datapoint_column = (!column.is_empty()).then(|| column.to_string());
        self.store.save_last_selection(&self.last_selection);
    }

    async fn load_server_preview(&mut self, name: &str) -> bool {
        match self.backend.preview_upload(name).await {
            Ok(table) => {
                self.server_preview = Some(table);
                true
            }
            Err(error) => {
                tracing::warn!(file = %name, %error, "server preview failed");
                self.server_preview = None;
                false
            }
        }
    }

    // ── Regex ──────────────────────────────────────────────────────

    /// Change the pattern; re-runs against the current datapoints.
    pub async fn set_pattern(&mut self, pattern: &str) -> Option<RegexOutcome> {
        if !self.regex.set_pattern(pattern) {
            return None;
        }
        let outcome = self.regex.run(&self.backend, &self.datapoints).await;
        self.store.save_regex(&self.regex.snapshot());
        Some(outcome)
    }

    /// Run the current pattern again.
    pub async fn run_regex(&mut self) -> RegexOutcome {
        let outcome = self.regex.run(&self.backend, &self.datapoints).await;
        self.store.save_regex(&self.regex.snapshot());
        outcome
    }

    // ── Ontology ───────────────────────────────────────────────────

    /// Replace the backend ontology; every autocomplete refetches.
    pub async fn upload_ontology(&mut self, path: &Path) -> Option<serde_json::Value> {
        let body = match self.backend.upload_ontology(path).await {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(file = %path.display(), %error, "ontology upload failed");
                return None;
            }
        };
        self.ontology_revision += 1;
        tracing::info!(
            file = %path.display(),
            revision = self.ontology_revision,
            "ontology uploaded"
        );
        self.refresh_searches().await;
        Some(body)
    }

    async fn refresh_searches(&self) -> [FetchOutcome; 3] {
        let searches = [&self.subject_search, &self.predicate_search, &self.object_search];
        let [s, p, o] = searches.map(|search| search.fetch(&self.backend, search.refresh()));
        let (s, p, o) = futures::join!(s, p, o);
        [s, p, o]
    }

    // ── Triples ────────────────────────────────────────────────────

    pub fn set_triple_field(&mut self, slot: TripleSlot, value: &str) {
        self.builder.set(slot, value);
        self.store.save_draft(self.builder.draft());
    }

    /// Put the item at `index` of `slot`'s current results into the draft.
    pub fn choose(&mut self, slot: TripleSlot, index: usize) -> Option<String> {
        let item = self.search(slot).item(index)?;
        self.set_triple_field(slot, &item);
        Some(item)
    }

    pub fn swap(&mut self) -> bool {
        let swapped = self.builder.swap();
        if swapped {
            self.store.save_draft(self.builder.draft());
        }
        swapped
    }

    pub fn instantiate(&mut self) -> Option<Triple> {
        let triple = self.builder.instantiate()?.clone();
        tracing::info!(
            id = %triple.id,
            subject = %triple.subject,
            predicate = %triple.predicate,
            object = %triple.object,
            "triple instantiated"
        );
        self.store.save_triples(self.builder.triples());
        Some(triple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::FakeBackend;
    use kb_core::entities::RegexSnapshot;
    use kb_store::MemoryStorage;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn workbench(backend: FakeBackend) -> Workbench<FakeBackend> {
        Workbench::open(backend, PersistedStore::in_memory(), SearchSettings::default())
    }

    fn sensors() -> FakeBackend {
        FakeBackend::new()
            .with_stored("a.csv", &["tag", "unit"], &["x", "y"])
            .with_stored("b.csv", &["tag"], &["y", "z"])
    }

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    async fn with_columns(wb: &mut Workbench<FakeBackend>) -> (String, String) {
        wb.add_existing(&names(&["a.csv", "b.csv"])).await;
        let a = wb.files()[0].id.clone();
        let b = wb.files()[1].id.clone();
        wb.set_column(&a, "tag").await;
        wb.set_column(&b, "tag").await;
        (a, b)
    }

    #[tokio::test]
    async fn add_existing_is_idempotent() {
        let mut wb = workbench(sensors());
        wb.add_existing(&names(&["a.csv"])).await;
        wb.backend().clear_calls();

        let report = wb.add_existing(&names(&["a.csv"])).await;

        assert_eq!(wb.files().len(), 1);
        assert!(wb.backend().calls_matching("preview_upload").is_empty());
        assert!(!report.datapoints_changed);
    }

    #[tokio::test]
    async fn selection_drives_combined_datapoints() {
        let mut wb = workbench(sensors());
        let (a, _) = with_columns(&mut wb).await;
        assert_eq!(wb.datapoints(), ["x", "y", "z"]);

        let report = wb.set_selected(&a, false).await.unwrap();
        assert!(report.datapoints_changed);
        assert_eq!(wb.datapoints(), ["y", "z"]);

        assert!(wb.set_selected(&a, false).await.is_none(), "no change");
        assert!(wb.set_selected("fil-missing", true).await.is_none());
    }

    #[tokio::test]
    async fn column_change_extracts_once() {
        let mut wb = workbench(sensors());
        wb.add_existing(&names(&["a.csv"])).await;
        let id = wb.files()[0].id.clone();
        wb.backend().clear_calls();

        let report = wb.set_column(&id, "tag").await.unwrap();

        assert_eq!(wb.backend().calls_matching("extract_upload"), vec!["extract_upload:a.csv:tag"]);
        assert_eq!(report.repair, RepairReport::default());
        assert_eq!(wb.file(&id).unwrap().datapoints.as_deref(), Some(&names(&["x", "y"])[..]));
        assert!(wb.set_column(&id, "tag").await.is_none());
    }

    #[tokio::test]
    async fn failed_extraction_is_retried_by_sync() {
        let mut wb = workbench(sensors().failing("extract_upload"));
        wb.add_existing(&names(&["a.csv"])).await;
        let id = wb.files()[0].id.clone();

        wb.set_column(&id, "tag").await;
        assert_eq!(wb.backend().calls_matching("extract_upload").len(), 1);
        assert!(wb.file(&id).unwrap().datapoints.is_none());

        wb.backend().set_failing("extract_upload", false);
        let report = wb.sync().await;

        assert_eq!(report.repair.datapoints, 1);
        assert_eq!(wb.datapoints(), ["x", "y"]);
    }

    #[tokio::test]
    async fn clearing_the_column_drops_datapoints() {
        let mut wb = workbench(sensors());
        let (a, _) = with_columns(&mut wb).await;

        wb.set_column(&a, "").await.unwrap();

        let entry = wb.file(&a).unwrap();
        assert!(entry.selected_column.is_none());
        assert!(entry.datapoints.is_none());
        assert_eq!(wb.datapoints(), ["y", "z"]);
    }

    #[tokio::test]
    async fn regex_follows_pattern_and_datapoints() {
        let backend = FakeBackend::new()
            .with_stored("s.csv", &["tag"], &["temp_01", "temp_02", "hum_01"])
            .with_stored("t.csv", &["tag"], &["temp_03"]);
        let mut wb = workbench(backend);

        assert_eq!(wb.set_pattern("^temp_").await, Some(RegexOutcome::Skipped));

        wb.add_existing(&names(&["s.csv"])).await;
        let id = wb.files()[0].id.clone();
        let report = wb.set_column(&id, "tag").await.unwrap();
        assert_eq!(report.regex, Some(RegexOutcome::Applied { matches: 2 }));

        wb.add_existing(&names(&["t.csv"])).await;
        let id = wb.files()[1].id.clone();
        let report = wb.set_column(&id, "tag").await.unwrap();
        assert_eq!(report.regex, Some(RegexOutcome::Applied { matches: 3 }));

        assert_eq!(wb.set_pattern("^hum_").await, Some(RegexOutcome::Applied { matches: 1 }));
        assert_eq!(wb.set_pattern("^hum_").await, None);
    }

    #[tokio::test]
    async fn add_local_uploads_and_previews() {
        let backend = FakeBackend::new()
            .with_local_preview("a.csv", &["tag"])
            .with_stored("a.csv", &["tag"], &["x"]);
        let mut wb = workbench(backend);

        wb.add_local(&[PathBuf::from("/data/a.csv")]).await;

        let entry = &wb.files()[0];
        assert_eq!(entry.server_filename.as_deref(), Some("a.csv"));
        assert!(entry.preview.is_some());
        assert_eq!(wb.backend().calls_matching("upload_files"), vec!["upload_files:1"]);
        assert!(wb.backend().calls_matching("preview_upload").is_empty());
    }

    #[tokio::test]
    async fn remove_from_server_requires_success() {
        let mut wb = workbench(sensors().failing("delete_upload"));
        wb.add_existing(&names(&["a.csv"])).await;
        let id = wb.files()[0].id.clone();

        assert!(wb.remove_from_server(&id).await.is_none());
        assert_eq!(wb.files().len(), 1);

        wb.backend().set_failing("delete_upload", false);
        assert!(wb.remove_from_server(&id).await.is_some());
        assert!(wb.files().is_empty());
        assert_eq!(wb.available_uploads(), ["b.csv"]);
    }

    #[tokio::test]
    async fn remove_keeps_the_server_copy() {
        let mut wb = workbench(sensors());
        let (a, _) = with_columns(&mut wb).await;

        wb.remove(&a).await.unwrap();

        assert_eq!(wb.files().len(), 1);
        assert_eq!(wb.datapoints(), ["y", "z"]);
        assert!(wb.backend().calls_matching("delete_upload").is_empty());
        assert!(wb.remove(&a).await.is_none());
    }

    #[tokio::test]
    async fn session_survives_reopen_and_repairs_on_start() {
        let storage = Arc::new(MemoryStorage::new());
        let mut wb = Workbench::open(
            sensors(),
            PersistedStore::new(Arc::clone(&storage)),
            SearchSettings::default(),
        );
        with_columns(&mut wb).await;
        wb.set_pattern("y").await;
        wb.set_triple_field(TripleSlot::Subject, "Pump1");
        wb.set_triple_field(TripleSlot::Predicate, "hasSensor");
        wb.set_triple_field(TripleSlot::Object, "Sensor7");
        wb.instantiate().unwrap();
        wb.select_server_file("b.csv").await;
        wb.set_datapoint_column("tag");
        let files = wb.files().to_vec();
        let triples = wb.triples().to_vec();

        // Drop derived data from the stored registry to force a repair.
        let mut stripped = files.clone();
        for entry in &mut stripped {
            entry.preview = None;
            entry.datapoints = None;
        }
        storage.insert_raw("kb_files", &serde_json::to_string(&stripped).unwrap());

        let mut reopened = Workbench::open(
            sensors(),
            PersistedStore::new(Arc::clone(&storage)),
            SearchSettings::default(),
        );
        assert!(reopened.datapoints().is_empty());
        assert_eq!(reopened.triples(), &triples[..]);
        assert_eq!(reopened.draft().subject, "Pump1");
        assert_eq!(reopened.regex().pattern(), "y");

        let report = reopened.start().await;

        assert_eq!(report.repair.previews, 2);
        assert_eq!(report.repair.datapoints, 2);
        assert_eq!(report.regex, Some(RegexOutcome::Applied { matches: 1 }));
        assert_eq!(reopened.files(), &files[..]);
        assert_eq!(reopened.datapoints(), ["x", "y", "z"]);
        assert_eq!(reopened.available_uploads(), ["a.csv", "b.csv"]);
        assert_eq!(reopened.last_selection().server_file.as_deref(), Some("b.csv"));
        assert_eq!(reopened.last_selection().datapoint_column.as_deref(), Some("tag"));
        assert!(reopened.server_preview().is_some());
    }

    #[tokio::test]
    async fn failed_server_preview_clears_the_previous_one() {
        let mut wb = workbench(sensors().failing("preview_upload:b.csv"));

        assert!(wb.select_server_file("a.csv").await);
        assert!(wb.server_preview().is_some());

        assert!(!wb.select_server_file("b.csv").await);
        assert_eq!(wb.last_selection().server_file.as_deref(), Some("b.csv"));
        assert!(wb.server_preview().is_none());
    }

    #[tokio::test]
    async fn restored_datapoints_without_column_are_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw(
            "kb_files",
            r#"[{"id":"fil-00000001","source":"local","displayName":"a.csv","datapoints":["ghost"],"selected":true}]"#,
        );
        let mut wb = Workbench::open(
            sensors(),
            PersistedStore::new(storage),
            SearchSettings::default(),
        );
        assert!(wb.datapoints().is_empty());

        wb.set_pattern("ghost").await;
        let report = wb.start().await;

        assert!(wb.datapoints().is_empty());
        assert!(wb.files()[0].datapoints.is_none());
        assert_eq!(report.regex, Some(RegexOutcome::Skipped));
        assert!(wb.backend().calls_matching("apply_regex").is_empty());
    }

    #[tokio::test]
    async fn corrupt_snapshots_start_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.insert_raw("kb_files", "{not json");
        storage.insert_raw("kb_regex_state", "[]");
        let wb = Workbench::open(
            sensors(),
            PersistedStore::new(storage),
            SearchSettings::default(),
        );
        assert!(wb.files().is_empty());
        assert_eq!(wb.regex().snapshot(), RegexSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn ontology_upload_refreshes_every_search() {
        let backend = FakeBackend::new()
            .with_ontology(OntologyKind::Entities, &["Pump1", "Sensor7"])
            .with_ontology(OntologyKind::Properties, &["hasSensor"]);
        let mut wb = workbench(backend);

        let body = wb.upload_ontology(Path::new("plant.ttl")).await;

        assert!(body.is_some());
        assert_eq!(wb.ontology_revision(), 1);
        assert_eq!(wb.backend().calls_matching("list_ontology").len(), 3);
        assert_eq!(wb.search(TripleSlot::Predicate).view().items, vec!["hasSensor"]);

        assert_eq!(wb.choose(TripleSlot::Object, 1).as_deref(), Some("Sensor7"));
        assert_eq!(wb.draft().object, "Sensor7");
        assert!(wb.choose(TripleSlot::Object, 5).is_none());
    }

    #[tokio::test]
    async fn failed_ontology_upload_keeps_revision() {
        let mut wb = workbench(FakeBackend::new().failing("upload_ontology"));
        assert!(wb.upload_ontology(Path::new("plant.ttl")).await.is_none());
        assert_eq!(wb.ontology_revision(), 0);
        assert!(wb.backend().calls_matching("list_ontology").is_empty());
    }

    #[tokio::test]
    async fn swap_and_instantiate_persist() {
        let storage = Arc::new(MemoryStorage::new());
        let mut wb = Workbench::open(
            FakeBackend::new(),
            PersistedStore::new(Arc::clone(&storage)),
            SearchSettings::default(),
        );
        wb.set_triple_field(TripleSlot::Subject, "A");
        wb.set_triple_field(TripleSlot::Object, "B");
        assert!(!wb.swap());
        assert!(wb.instantiate().is_none());

        wb.set_triple_field(TripleSlot::Predicate, "hasSensor");
        assert!(wb.swap());
        let first = wb.instantiate().unwrap();
        let second = wb.instantiate().unwrap();
        assert_ne!(first.id, second.id);

        let draft: TripleDraft = serde_json::from_str(&storage.raw("kb_spo").unwrap()).unwrap();
        assert_eq!((draft.subject.as_str(), draft.object.as_str()), ("B", "A"));
        let triples: Vec<Triple> =
            serde_json::from_str(&storage.raw("kb_triples").unwrap()).unwrap();
        assert_eq!(triples, vec![first, second]);
    }
}
