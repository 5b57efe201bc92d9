use kb_workbench::PipelineReport;
use serde::Serialize;

use super::types::{FileSummary, summarize};
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SyncResponse {
    pipeline: PipelineReport,
    available: Vec<String>,
    files: Vec<FileSummary>,
}

/// Handle `kbw sync`.
pub async fn handle(ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let pipeline = ctx.workbench.start().await;
    let wb = &ctx.workbench;
    output(
        &SyncResponse {
            pipeline,
            available: wb.available_uploads().to_vec(),
            files: summarize(wb.files()),
        },
        flags.format,
    )
}
