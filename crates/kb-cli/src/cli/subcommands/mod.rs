mod db;
mod files;
mod ontology;
mod regex;
mod triple;

pub use db::{DbCommands, DbConnectArgs};
pub use files::FilesCommands;
pub use ontology::OntologyCommands;
pub use regex::RegexCommands;
pub use triple::{TripleCommands, TripleFieldArgs};
