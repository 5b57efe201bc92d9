use std::path::PathBuf;

use clap::Subcommand;

/// File registry commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FilesCommands {
    /// List registered files.
    List,
    /// List files stored on the backend.
    Available,
    /// Upload local files and register them.
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Register files the backend already stores.
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Include a file in the combined datapoints.
    Select { id: String },
    /// Exclude a file from the combined datapoints.
    Deselect { id: String },
    /// Choose the datapoint column of a file ("" clears it).
    Column { id: String, column: String },
    /// Forget a file (the server copy is kept).
    Remove { id: String },
    /// Delete a file from the backend and forget it.
    Delete { id: String },
}
