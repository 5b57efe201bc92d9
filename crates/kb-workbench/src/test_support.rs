//! Shared test utilities for kb-workbench unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::{HashMap, HashSet};
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use std::time::Duration;

    use kb_client::{Backend, BackendError, OntologyPage, UploadReport};
    use kb_core::entities::{PreviewTable, RegexMatch};
    use kb_core::enums::OntologyKind;
    use serde_json::{Map, Value, json};

    struct StoredFile {
        columns: Vec<String>,
        values: Vec<String>,
    }

    #[derive(Default)]
    struct FakeState {
        /// Stored files in upload order.
        stored: Vec<(String, StoredFile)>,
        /// Ad hoc previews by file name.
        local: HashMap<String, Vec<String>>,
        ontology: HashMap<OntologyKind, Vec<String>>,
        failing: HashSet<String>,
        latency: HashMap<String, Duration>,
        calls: Vec<String>,
    }

    /// Scripted [`Backend`] that records every call.
    ///
    /// Calls are recorded as `name:arg:arg`; the same key (or its bare name)
    /// can be marked failing or delayed.
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        state: Mutex<FakeState>,
    }

    fn table(columns: &[String]) -> PreviewTable {
        let row: Map<String, Value> = columns
            .iter()
            .map(|c| (c.clone(), json!(format!("{c}-0"))))
            .collect();
        PreviewTable {
            columns: columns.to_vec(),
            rows: vec![row],
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    impl FakeBackend {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// A file the backend already stores; extraction of any of its
        /// columns yields `values`.
        pub(crate) fn with_stored(self, name: &str, columns: &[&str], values: &[&str]) -> Self {
            self.lock().stored.push((
                name.to_string(),
                StoredFile {
                    columns: strings(columns),
                    values: strings(values),
                },
            ));
            self
        }

        /// Columns reported by the ad hoc preview of a local file.
        pub(crate) fn with_local_preview(self, name: &str, columns: &[&str]) -> Self {
            self.lock().local.insert(name.to_string(), strings(columns));
            self
        }

        pub(crate) fn with_ontology(self, kind: OntologyKind, items: &[&str]) -> Self {
            self.lock().ontology.insert(kind, strings(items));
            self
        }

        pub(crate) fn failing(self, key: &str) -> Self {
            self.set_failing(key, true);
            self
        }

        pub(crate) fn with_latency(self, key: &str, latency: Duration) -> Self {
            self.set_latency(key, latency);
            self
        }

        pub(crate) fn set_latency(&self, key: &str, latency: Duration) {
            self.lock().latency.insert(key.to_string(), latency);
        }

        pub(crate) fn set_failing(&self, key: &str, failing: bool) {
            let mut state = self.lock();
            if failing {
                state.failing.insert(key.to_string());
            } else {
                state.failing.remove(key);
            }
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.lock().calls.clone()
        }

        pub(crate) fn calls_matching(&self, name: &str) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| c.split(':').next() == Some(name))
                .collect()
        }

        pub(crate) fn clear_calls(&self) {
            self.lock().calls.clear();
        }

        fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
            self.state.lock().unwrap()
        }

        /// Record the call, wait out its latency, then fail if scripted to.
        async fn enter(&self, call: String) -> Result<(), BackendError> {
            let (latency, fails) = {
                let mut state = self.lock();
                state.calls.push(call.clone());
                let name = call.split(':').next().unwrap_or_default();
                let fails = state.failing.contains(&call) || state.failing.contains(name);
                (state.latency.get(&call).copied(), fails)
            };
            if let Some(latency) = latency {
                tokio::time::sleep(latency).await;
            }
            if fails {
                return Err(BackendError::Api {
                    status: 500,
                    message: format!("scripted failure: {call}"),
                });
            }
            Ok(())
        }
    }

    fn name_of(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl Backend for FakeBackend {
        async fn upload_files(&self, paths: &[PathBuf]) -> Result<Vec<UploadReport>, BackendError> {
            self.enter(format!("upload_files:{}", paths.len())).await?;
            let mut state = self.lock();
            let mut report = Vec::new();
            for path in paths {
                let name = name_of(path);
                let columns = state.local.get(&name).cloned().unwrap_or_default();
                let values = state
                    .stored
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, f)| f.values.clone())
                    .unwrap_or_default();
                state.stored.retain(|(n, _)| *n != name);
                state
                    .stored
                    .push((name.clone(), StoredFile { columns, values }));
                report.push(UploadReport {
                    saved_to: Some(format!("uploads/{name}")),
                    filename: name,
                });
            }
            Ok(report)
        }

        async fn preview_file(&self, path: &Path) -> Result<PreviewTable, BackendError> {
            let name = name_of(path);
            self.enter(format!("preview_file:{name}")).await?;
            self.lock()
                .local
                .get(&name)
                .map(|c| table(c))
                .ok_or_else(|| BackendError::Parse("unreadable table".into()))
        }

        async fn preview_upload(&self, filename: &str) -> Result<PreviewTable, BackendError> {
            self.enter(format!("preview_upload:{filename}")).await?;
            let state = self.lock();
            state
                .stored
                .iter()
                .find(|(n, _)| n == filename)
                .map(|(_, f)| table(&f.columns))
                .ok_or_else(|| BackendError::Api {
                    status: 404,
                    message: "File not found".into(),
                })
        }

        async fn extract_upload(
            &self,
            filename: &str,
            column: &str,
        ) -> Result<Vec<String>, BackendError> {
            self.enter(format!("extract_upload:{filename}:{column}")).await?;
            let state = self.lock();
            let (_, file) = state
                .stored
                .iter()
                .find(|(n, _)| n == filename)
                .ok_or_else(|| BackendError::Api {
                    status: 404,
                    message: "File not found".into(),
                })?;
            if !file.columns.iter().any(|c| c == column) {
                return Err(BackendError::Api {
                    status: 400,
                    message: format!("Column '{column}' not found"),
                });
            }
            Ok(file.values.clone())
        }

        async fn delete_upload(&self, filename: &str) -> Result<(), BackendError> {
            self.enter(format!("delete_upload:{filename}")).await?;
            self.lock().stored.retain(|(n, _)| n != filename);
            Ok(())
        }

        async fn list_uploads(&self) -> Result<Vec<String>, BackendError> {
            self.enter("list_uploads".into()).await?;
            Ok(self.lock().stored.iter().map(|(n, _)| n.clone()).collect())
        }

        async fn list_ontology(
            &self,
            kind: OntologyKind,
            page: u32,
            limit: u32,
            query: &str,
        ) -> Result<OntologyPage, BackendError> {
            self.enter(format!("list_ontology:{kind}:{page}:{query}")).await?;
            let state = self.lock();
            let needle = query.to_lowercase();
            let hits: Vec<String> = state
                .ontology
                .get(&kind)
                .into_iter()
                .flatten()
                .filter(|item| item.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            let start = (page.saturating_sub(1) * limit) as usize;
            Ok(OntologyPage {
                total: hits.len() as u64,
                items: hits.into_iter().skip(start).take(limit as usize).collect(),
            })
        }

        async fn apply_regex(
            &self,
            regex: &str,
            datapoints: &[String],
        ) -> Result<Vec<RegexMatch>, BackendError> {
            self.enter(format!("apply_regex:{regex}")).await?;
            let matches = |dp: &str| {
                regex
                    .strip_prefix('^')
                    .map_or_else(|| dp.contains(regex), |prefix| dp.starts_with(prefix))
            };
            Ok(datapoints
                .iter()
                .filter(|dp| matches(dp))
                .map(|dp| RegexMatch {
                    datapoint: dp.clone(),
                    groups: Some([("_".to_string(), dp.clone())].into()),
                })
                .collect())
        }

        async fn upload_ontology(&self, path: &Path) -> Result<Value, BackendError> {
            self.enter(format!("upload_ontology:{}", name_of(path))).await?;
            Ok(json!({"ok": true, "triples": 42}))
        }
    }
}
