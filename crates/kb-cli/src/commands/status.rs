use kb_core::entities::{LastSelection, TripleDraft};
use serde::Serialize;

use super::types::{FileSummary, summarize};
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct StatusResponse {
    backend: String,
    files: Vec<FileSummary>,
    datapoints: usize,
    pattern: String,
    matches: usize,
    draft: TripleDraft,
    triples: usize,
    last_selection: LastSelection,
}

/// Handle `kbw status`. Reads saved state only; no backend calls.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let wb = &ctx.workbench;
    output(
        &StatusResponse {
            backend: ctx.config.backend.normalized_root().to_string(),
            files: summarize(wb.files()),
            datapoints: wb.datapoints().len(),
            pattern: wb.regex().pattern(),
            matches: wb.regex_results().len(),
            draft: wb.draft().clone(),
            triples: wb.triples().len(),
            last_selection: wb.last_selection().clone(),
        },
        flags.format,
    )
}
