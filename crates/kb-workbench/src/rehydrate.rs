//! Repair of entries whose derived data is missing.
//!
//! Previews and datapoints are derived from the backend and may be absent
//! after a reload or a failed request. A repair round plans the missing
//! pieces from a registry snapshot, fetches them concurrently, then merges
//! successes back by entry ID. Failures stay missing and are retried on the
//! next round.

use futures::future::join_all;
use kb_client::Backend;
use kb_core::entities::PreviewTable;
use serde::Serialize;

use crate::registry::FileRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRepair {
    pub id: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRepair {
    pub id: String,
    pub filename: String,
    pub column: String,
}

/// The backend calls needed to fill in missing derived data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairPlan {
    pub previews: Vec<PreviewRepair>,
    pub extractions: Vec<ExtractRepair>,
}

impl RepairPlan {
    /// Plan repairs for every server-backed entry lacking a preview, or
    /// lacking datapoints for its chosen column.
    #[must_use]
    pub fn for_registry(registry: &FileRegistry) -> Self {
        let mut plan = Self::default();
        for entry in registry.entries() {
            let Some(filename) = entry.server_filename.as_ref() else {
                continue;
            };
            if entry.needs_preview() {
                plan.previews.push(PreviewRepair {
                    id: entry.id.clone(),
                    filename: filename.clone(),
                });
            }
            if let (true, Some(column)) = (entry.needs_datapoints(), &entry.selected_column) {
                plan.extractions.push(ExtractRepair {
                    id: entry.id.clone(),
                    filename: filename.clone(),
                    column: column.clone(),
                });
            }
        }
        plan
    }

    /// Drop the extraction planned for `id` (already attempted this round).
    #[must_use]
    pub fn without_extraction(mut self, id: &str) -> Self {
        self.extractions.retain(|e| e.id != id);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.previews.is_empty() && self.extractions.is_empty()
    }

    /// Issue every planned call concurrently and collect the successes.
    pub async fn execute<B: Backend>(&self, backend: &B) -> RepairOutcome {
        let previews = join_all(self.previews.iter().map(|r| async move {
            match backend.preview_upload(&r.filename).await {
                Ok(table) => Some((r.id.clone(), table)),
                Err(error) => {
                    tracing::warn!(file = %r.filename, %error, "preview repair failed");
                    None
                }
            }
        }));
        let extractions = join_all(self.extractions.iter().map(|r| async move {
            match backend.extract_upload(&r.filename, &r.column).await {
                Ok(dps) => Some((r.id.clone(), r.column.clone(), dps)),
                Err(error) => {
                    tracing::warn!(
                        file = %r.filename,
                        column = %r.column,
                        %error,
                        "datapoint repair failed"
                    );
                    None
                }
            }
        }));
        let (previews, extractions) = futures::join!(previews, extractions);

        let attempted = previews.len() + extractions.len();
        let previews: Vec<_> = previews.into_iter().flatten().collect();
        let datapoints: Vec<_> = extractions.into_iter().flatten().collect();
        RepairOutcome {
            failures: attempted - previews.len() - datapoints.len(),
            previews,
            datapoints,
        }
    }
}

/// Successful repairs, not yet merged.
#[derive(Debug, Default)]
pub struct RepairOutcome {
    pub previews: Vec<(String, PreviewTable)>,
    pub datapoints: Vec<(String, String, Vec<String>)>,
    pub failures: usize,
}

impl RepairOutcome {
    /// Merge into `registry` by ID. Entries removed meanwhile are skipped,
    /// as are datapoints whose column no longer matches the entry's.
    pub fn apply(self, registry: &mut FileRegistry) -> RepairReport {
        let mut report = RepairReport {
            failures: self.failures,
            ..RepairReport::default()
        };
        for (id, table) in self.previews {
            if registry.attach_preview(&id, table) {
                report.previews += 1;
            }
        }
        for (id, column, dps) in self.datapoints {
            if registry.attach_datapoints(&id, &column, dps) {
                report.datapoints += 1;
            }
        }
        report
    }
}

/// What one repair round changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RepairReport {
    pub previews: usize,
    pub datapoints: usize,
    pub failures: usize,
}

impl RepairReport {
    #[must_use]
    pub const fn changed(&self) -> bool {
        self.previews > 0 || self.datapoints > 0
    }
}
