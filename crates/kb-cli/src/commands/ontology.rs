use anyhow::Context;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OntologyCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct UploadResponse {
    revision: u64,
    response: Value,
}

/// Handle `kbw ontology`.
pub async fn handle(
    action: &OntologyCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OntologyCommands::Upload { path } => {
            let response = ctx
                .workbench
                .upload_ontology(path)
                .await
                .with_context(|| format!("ontology upload of {} failed", path.display()))?;
            output(
                &UploadResponse {
                    revision: ctx.workbench.ontology_revision(),
                    response,
                },
                flags.format,
            )
        }
    }
}
