use clap::{Args, Subcommand};
use kb_core::enums::OntologyKind;

use crate::cli::subcommands::{
    DbCommands, FilesCommands, OntologyCommands, RegexCommands, TripleCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Summary of the saved session.
    Status,
    /// Repair missing previews/datapoints and re-run the pipeline.
    Sync,
    /// Manage the file registry.
    Files {
        #[command(subcommand)]
        action: FilesCommands,
    },
    /// Open a stored file and remember it as the last selection.
    Open(OpenArgs),
    /// Combined datapoints of the selected files.
    Datapoints,
    /// Server-side regex over the combined datapoints.
    Regex {
        #[command(subcommand)]
        action: RegexCommands,
    },
    /// Search the ontology.
    Search(SearchArgs),
    /// Build subject/predicate/object triples.
    Triple {
        #[command(subcommand)]
        action: TripleCommands,
    },
    /// Ontology graph management.
    Ontology {
        #[command(subcommand)]
        action: OntologyCommands,
    },
    /// Database passthrough.
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct OpenArgs {
    /// Stored filename.
    pub filename: String,
    /// Datapoint column to remember for this file.
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// What to list: entities, properties, classes, instances.
    #[arg(value_parser = parse_kind)]
    pub kind: OntologyKind,
    /// Substring filter.
    pub query: Option<String>,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,
}

fn parse_kind(raw: &str) -> Result<OntologyKind, String> {
    raw.parse().map_err(|error: kb_core::errors::CoreError| error.to_string())
}
