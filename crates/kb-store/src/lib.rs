//! # kb-store
//!
//! Durable key/value snapshots for the knowledge workbench session.
//!
//! [`PersistedStore`] is the only component that touches storage. It never
//! fails: unreadable or malformed snapshots load as defaults (with a warning)
//! and failed writes are dropped, so losing persistence never interrupts the
//! in-memory session.

mod error;
mod storage;

pub use error::StoreError;
pub use storage::{DirStorage, MemoryStorage, Storage};

use kb_core::entities::{FileEntry, LastSelection, RegexSnapshot, Triple, TripleDraft};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Snapshot keys. Each writer owns exactly one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Files,
    Triples,
    Draft,
    Regex,
    LastSelection,
}

impl StoreKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Files => "kb_files",
            Self::Triples => "kb_triples",
            Self::Draft => "kb_spo",
            Self::Regex => "kb_regex_state",
            Self::LastSelection => "kb_restore",
        }
    }
}

/// Typed, failure-tolerant access to snapshot storage.
pub struct PersistedStore {
    storage: Box<dyn Storage>,
}

impl PersistedStore {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    /// Store backed by process memory only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Load a snapshot, falling back to `T::default()`.
    #[must_use]
    pub fn load<T: DeserializeOwned + Default>(&self, key: StoreKey) -> T {
        self.load_or(key, T::default())
    }

    /// Load a snapshot, falling back to `default` when it is absent,
    /// unreadable, or of the wrong shape.
    #[must_use]
    pub fn load_or<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        let Some(raw) = self.read_raw(key) else {
            return default;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key = key.as_str(), %error, "discarding malformed snapshot");
                default
            }
        }
    }

    /// Load a list snapshot entry by entry.
    ///
    /// Malformed entries are dropped individually; anything that is not a
    /// JSON array loads as empty.
    #[must_use]
    pub fn load_list<T: DeserializeOwned>(&self, key: StoreKey) -> Vec<T> {
        let Some(items) = self.load_or::<Option<Vec<Value>>>(key, None) else {
            return Vec::new();
        };
        let total = items.len();
        let kept: Vec<T> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if kept.len() < total {
            tracing::warn!(
                key = key.as_str(),
                dropped = total - kept.len(),
                "dropped malformed snapshot entries"
            );
        }
        kept
    }

    /// Write a snapshot. Failures are logged at debug level and swallowed.
    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::debug!(key = key.as_str(), %error, "snapshot not serializable");
                return;
            }
        };
        if let Err(error) = self.storage.write(key.as_str(), &raw) {
            tracing::debug!(key = key.as_str(), %error, "snapshot not saved");
        }
    }

    fn read_raw(&self, key: StoreKey) -> Option<String> {
        match self.storage.read(key.as_str()) {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(key = key.as_str(), %error, "snapshot unreadable");
                None
            }
        }
    }

    // ── Typed snapshots ────────────────────────────────────────────

    #[must_use]
    pub fn load_files(&self) -> Vec<FileEntry> {
        self.load_list(StoreKey::Files)
    }

    /// Local paths are never written (`FileEntry` skips them).
    pub fn save_files(&self, files: &[FileEntry]) {
        self.save(StoreKey::Files, files);
    }

    #[must_use]
    pub fn load_triples(&self) -> Vec<Triple> {
        self.load_list(StoreKey::Triples)
    }

    pub fn save_triples(&self, triples: &[Triple]) {
        self.save(StoreKey::Triples, triples);
    }

    #[must_use]
    pub fn load_draft(&self) -> TripleDraft {
        self.load(StoreKey::Draft)
    }

    pub fn save_draft(&self, draft: &TripleDraft) {
        self.save(StoreKey::Draft, draft);
    }

    #[must_use]
    pub fn load_regex(&self) -> RegexSnapshot {
        self.load(StoreKey::Regex)
    }

    pub fn save_regex(&self, snapshot: &RegexSnapshot) {
        self.save(StoreKey::Regex, snapshot);
    }

    #[must_use]
    pub fn load_last_selection(&self) -> LastSelection {
        self.load(StoreKey::LastSelection)
    }

    pub fn save_last_selection(&self, selection: &LastSelection) {
        self.save(StoreKey::LastSelection, selection);
    }
}
