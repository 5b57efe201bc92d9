use kb_workbench::{FetchOutcome, SearchController, SearchView};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SearchResponse {
    outcome: FetchOutcome,
    #[serde(flatten)]
    view: SearchView,
}

/// Handle `kbw search`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let search = SearchController::new(args.kind, ctx.search_settings());
    search.set_query(args.query.as_deref().unwrap_or_default());
    let ticket = search.set_page(args.page);
    let outcome = search.fetch(ctx.client(), ticket).await;
    if outcome == FetchOutcome::Failed {
        anyhow::bail!("ontology search failed; see log for details");
    }
    output(
        &SearchResponse {
            outcome,
            view: search.view(),
        },
        flags.format,
    )
}
