use clap::{Args, Subcommand};

/// Triple builder commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TripleCommands {
    /// Set the subject (an ontology entity).
    Subject(TripleFieldArgs),
    /// Set the predicate (an ontology property).
    Predicate(TripleFieldArgs),
    /// Set the object (an ontology entity).
    Object(TripleFieldArgs),
    /// Exchange subject and object.
    Swap,
    /// Append the draft as a new triple.
    Instantiate,
    /// List instantiated triples.
    List,
    /// Show the draft.
    Draft,
}

#[derive(Clone, Debug, Args)]
pub struct TripleFieldArgs {
    /// Literal value. Required unless `--search` is given.
    pub value: Option<String>,
    /// Pick the value from an ontology search instead.
    #[arg(long, conflicts_with = "value")]
    pub search: Option<String>,
    /// Index of the search result to pick.
    #[arg(long, default_value_t = 0)]
    pub pick: usize,
}
