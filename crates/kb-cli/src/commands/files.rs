use anyhow::{Context, bail};
use kb_workbench::PipelineReport;
use serde::Serialize;

use super::types::{FileSummary, summarize};
use crate::cli::GlobalFlags;
use crate::cli::subcommands::FilesCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FilesResponse {
    files: Vec<FileSummary>,
}

#[derive(Debug, Serialize)]
struct AvailableResponse<'a> {
    available: &'a [String],
}

#[derive(Debug, Serialize)]
struct ChangeResponse {
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pipeline: Option<PipelineReport>,
    files: Vec<FileSummary>,
}

/// Handle `kbw files`.
pub async fn handle(
    action: &FilesCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let wb = &mut ctx.workbench;
    let pipeline = match action {
        FilesCommands::List => {
            return output(
                &FilesResponse {
                    files: summarize(wb.files()),
                },
                flags.format,
            );
        }
        FilesCommands::Available => {
            if !wb.refresh_uploads().await {
                bail!("could not list stored files (backend unreachable?)");
            }
            return output(
                &AvailableResponse {
                    available: wb.available_uploads(),
                },
                flags.format,
            );
        }
        FilesCommands::Upload { paths } => {
            for path in paths {
                if !path.is_file() {
                    bail!("not a file: {}", path.display());
                }
            }
            Some(wb.add_local(paths).await)
        }
        FilesCommands::Add { names } => Some(wb.add_existing(names).await),
        FilesCommands::Select { id } => {
            require(wb.file(id).is_some(), id)?;
            wb.set_selected(id, true).await
        }
        FilesCommands::Deselect { id } => {
            require(wb.file(id).is_some(), id)?;
            wb.set_selected(id, false).await
        }
        FilesCommands::Column { id, column } => {
            let entry = wb.file(id).with_context(|| format!("no file with id {id}"))?;
            if let (false, Some(preview)) = (column.is_empty(), &entry.preview)
                && !preview.has_column(column)
            {
                tracing::warn!(file = entry.lookup_name(), %column, "column not in preview");
            }
            wb.set_column(id, column).await
        }
        FilesCommands::Remove { id } => {
            require(wb.file(id).is_some(), id)?;
            wb.remove(id).await
        }
        FilesCommands::Delete { id } => {
            let entry = wb.file(id).with_context(|| format!("no file with id {id}"))?;
            if entry.server_filename.is_none() {
                bail!("{} was never stored on the backend", entry.display_name);
            }
            let report = wb.remove_from_server(id).await;
            if report.is_none() {
                bail!("backend refused to delete {id}; see log for details");
            }
            report
        }
    };

    output(
        &ChangeResponse {
            changed: pipeline.is_some(),
            pipeline,
            files: summarize(wb.files()),
        },
        flags.format,
    )
}

fn require(found: bool, id: &str) -> anyhow::Result<()> {
    if !found {
        bail!("no file with id {id}");
    }
    Ok(())
}
