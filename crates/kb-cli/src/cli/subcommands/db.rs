use clap::{Args, Subcommand};

/// Database passthrough commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DbCommands {
    /// Test a database connection.
    Connect(DbConnectArgs),
    /// Run SQL on the connected database.
    Query { sql: String },
}

#[derive(Clone, Debug, Args)]
pub struct DbConnectArgs {
    #[arg(long, default_value = "localhost")]
    pub host: String,
    #[arg(long, default_value_t = 5432)]
    pub port: u16,
    #[arg(long)]
    pub user: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long)]
    pub database: String,
}
