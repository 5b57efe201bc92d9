use std::path::PathBuf;

use clap::Subcommand;

/// Ontology commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OntologyCommands {
    /// Replace the backend ontology with a Turtle (.ttl) file.
    Upload { path: PathBuf },
}
