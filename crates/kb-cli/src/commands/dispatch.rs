use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Status => commands::status::handle(ctx, flags),
        Commands::Sync => commands::sync::handle(ctx, flags).await,
        Commands::Files { action } => commands::files::handle(&action, ctx, flags).await,
        Commands::Open(args) => commands::open::handle(&args, ctx, flags).await,
        Commands::Datapoints => commands::datapoints::handle(ctx, flags),
        Commands::Regex { action } => commands::regex::handle(&action, ctx, flags).await,
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Triple { action } => commands::triple::handle(&action, ctx, flags).await,
        Commands::Ontology { action } => commands::ontology::handle(&action, ctx, flags).await,
        Commands::Db { action } => commands::db::handle(&action, ctx, flags).await,
    }
}
