use anyhow::{Context, bail};
use kb_core::entities::{Triple, TripleDraft};
use kb_workbench::TripleSlot;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{TripleCommands, TripleFieldArgs};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DraftResponse<'a> {
    draft: &'a TripleDraft,
    can_instantiate: bool,
}

#[derive(Debug, Serialize)]
struct TriplesResponse<'a> {
    triples: &'a [Triple],
}

/// Handle `kbw triple`.
pub async fn handle(
    action: &TripleCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TripleCommands::Subject(args) => set_field(TripleSlot::Subject, args, ctx).await?,
        TripleCommands::Predicate(args) => set_field(TripleSlot::Predicate, args, ctx).await?,
        TripleCommands::Object(args) => set_field(TripleSlot::Object, args, ctx).await?,
        TripleCommands::Swap => {
            if !ctx.workbench.swap() {
                bail!("nothing to swap: set a predicate first");
            }
        }
        TripleCommands::Instantiate => {
            let triple = ctx
                .workbench
                .instantiate()
                .context("draft is incomplete: subject, predicate and object are all required")?;
            return output(&triple, flags.format);
        }
        TripleCommands::List => {
            return output(
                &TriplesResponse {
                    triples: ctx.workbench.triples(),
                },
                flags.format,
            );
        }
        TripleCommands::Draft => {}
    }

    let draft = ctx.workbench.draft();
    output(
        &DraftResponse {
            draft,
            can_instantiate: draft.is_complete(),
        },
        flags.format,
    )
}

async fn set_field(slot: TripleSlot, args: &TripleFieldArgs, ctx: &mut AppContext) -> anyhow::Result<()> {
    let wb = &mut ctx.workbench;
    if let Some(value) = &args.value {
        wb.set_triple_field(slot, value);
        return Ok(());
    }
    let Some(query) = &args.search else {
        bail!("give a value or --search <query>");
    };

    let search = wb.search(slot);
    search.set_query(query);
    search.fetch(wb.backend(), search.refresh()).await;
    let picked = wb
        .choose(slot, args.pick)
        .with_context(|| format!("no result #{} for '{query}'", args.pick))?;
    tracing::debug!(?slot, %picked, "picked from search");
    Ok(())
}
