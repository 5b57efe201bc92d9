use super::types::RegexResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegexCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `kbw regex`.
pub async fn handle(
    action: &RegexCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let wb = &mut ctx.workbench;
    let outcome = match action {
        RegexCommands::Set { pattern } => wb.set_pattern(pattern).await,
        RegexCommands::Run => Some(wb.run_regex().await),
        RegexCommands::Show => None,
    };
    output(&RegexResponse::new(wb.regex(), outcome), flags.format)
}
