use anyhow::Context;
use kb_client::DbCredentials;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DbCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `kbw db`.
pub async fn handle(action: &DbCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.client();
    match action {
        DbCommands::Connect(args) => {
            let creds = DbCredentials {
                host: args.host.clone(),
                port: args.port,
                user: args.user.clone(),
                password: args.password.clone(),
                database: args.database.clone(),
            };
            let response = client
                .connect(&creds)
                .await
                .with_context(|| format!("failed to connect to {}:{}", creds.host, creds.port))?;
            output(&response, flags.format)
        }
        DbCommands::Query { sql } => {
            let result = client.run_query(sql).await.context("query failed")?;
            output(&result, flags.format)
        }
    }
}
