//! Combined datapoint set across selected files.

use std::collections::HashSet;

use kb_core::entities::FileEntry;

/// Union of the datapoints of every selected entry, deduplicated by first
/// occurrence in registry order. Unselected entries and entries without
/// datapoints contribute nothing.
#[must_use]
pub fn aggregate(entries: &[FileEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    entries
        .iter()
        .filter(|e| e.selected)
        .filter_map(|e| e.datapoints.as_deref())
        .flatten()
        .filter(|dp| seen.insert(dp.as_str()))
        .cloned()
        .collect()
}
