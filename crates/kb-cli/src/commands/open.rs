use kb_core::entities::PreviewTable;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::OpenArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct OpenResponse<'a> {
    filename: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<&'a str>,
    preview: Option<&'a PreviewTable>,
}

/// Handle `kbw open`. The selection is remembered even when the preview fails.
pub async fn handle(args: &OpenArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let wb = &mut ctx.workbench;
    let loaded = wb.select_server_file(&args.filename).await;
    if let Some(column) = &args.column {
        wb.set_datapoint_column(column);
    }
    if !loaded {
        anyhow::bail!("could not preview {}; see log for details", args.filename);
    }
    output(
        &OpenResponse {
            filename: &args.filename,
            column: wb.last_selection().datapoint_column.as_deref(),
            preview: wb.server_preview(),
        },
        flags.format,
    )
}
