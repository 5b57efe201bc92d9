//! Entity structs for all workbench domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`. Field names
//! serialize in `camelCase` so persisted snapshots keep the key names the
//! workbench has always written (`displayName`, `serverFilename`, ...).

mod file_entry;
mod preview;
mod regex_match;
mod snapshots;
mod triple;

pub use file_entry::FileEntry;
pub use preview::PreviewTable;
pub use regex_match::RegexMatch;
pub use snapshots::{LastSelection, RegexSnapshot};
pub use triple::{Triple, TripleDraft};
