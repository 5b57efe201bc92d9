use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DatapointsResponse<'a> {
    count: usize,
    datapoints: &'a [String],
}

/// Handle `kbw datapoints`.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let datapoints = ctx.workbench.datapoints();
    output(
        &DatapointsResponse {
            count: datapoints.len(),
            datapoints,
        },
        flags.format,
    )
}
