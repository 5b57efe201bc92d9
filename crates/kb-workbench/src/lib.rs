//! # kb-workbench
//!
//! The client-side pipeline of the knowledge workbench:
//!
//! - [`registry`]: ordered file registry and entry construction
//! - [`rehydrate`]: concurrent repair of missing previews and datapoints
//! - [`aggregate`]: combined, deduplicated datapoints of selected files
//! - [`search`]: debounced, paginated ontology autocomplete
//! - [`regex_filter`]: server-side regex over the combined datapoints
//! - [`triples`]: subject/predicate/object assembly
//!
//! [`Workbench`] owns all of it and runs the pipeline after each change.

pub mod aggregate;
pub mod regex_filter;
pub mod registry;
pub mod rehydrate;
pub mod search;
pub mod session;
pub mod triples;

mod test_support;

pub use regex_filter::{RegexFilter, RegexOutcome};
pub use registry::FileRegistry;
pub use rehydrate::RepairReport;
pub use search::{FetchOutcome, SearchController, SearchSettings, SearchView};
pub use session::{PipelineReport, RegistryEvent, Workbench};
pub use triples::{TripleBuilder, TripleSlot};
