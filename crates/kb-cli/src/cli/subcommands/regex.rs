use clap::Subcommand;

/// Regex filter commands.
#[derive(Clone, Debug, Subcommand)]
pub enum RegexCommands {
    /// Set the pattern and run it.
    Set {
        #[arg(allow_hyphen_values = true)]
        pattern: String,
    },
    /// Run the saved pattern again.
    Run,
    /// Show the saved pattern and results.
    Show,
}
