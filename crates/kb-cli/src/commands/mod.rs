pub mod datapoints;
pub mod db;
pub mod dispatch;
pub mod files;
pub mod ontology;
pub mod open;
pub mod regex;
pub mod search;
pub mod status;
pub mod sync;
pub mod triple;
pub mod types;
