//! Server-side regex filtering of the combined datapoint set.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use kb_client::Backend;
use kb_core::entities::{RegexMatch, RegexSnapshot};
use serde::Serialize;

/// Group key the backend uses for the full match.
pub const FULL_MATCH: &str = "_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum RegexOutcome {
    /// Empty pattern or no datapoints; no request was made.
    Skipped,
    Applied { matches: usize },
    /// The request failed; previous results were kept.
    Failed,
    /// The pattern changed or a newer run started before this one resolved.
    Superseded,
}

#[derive(Debug, Default)]
struct RegexState {
    pattern: String,
    results: Vec<RegexMatch>,
    generation: u64,
}

/// Pattern plus the latest accepted result set.
///
/// Runs are tagged with a generation; only the most recently started run
/// may replace the results.
#[derive(Debug, Default)]
pub struct RegexFilter {
    state: Mutex<RegexState>,
}

impl RegexFilter {
    #[must_use]
    pub fn new(snapshot: RegexSnapshot) -> Self {
        Self {
            state: Mutex::new(RegexState {
                pattern: snapshot.q,
                results: snapshot.results,
                generation: 0,
            }),
        }
    }

    #[must_use]
    pub fn pattern(&self) -> String {
        self.lock().pattern.clone()
    }

    #[must_use]
    pub fn results(&self) -> Vec<RegexMatch> {
        self.lock().results.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> RegexSnapshot {
        let state = self.lock();
        RegexSnapshot {
            q: state.pattern.clone(),
            results: state.results.clone(),
        }
    }

    /// Replace the pattern. An actual change invalidates in-flight runs.
    pub fn set_pattern(&self, pattern: &str) -> bool {
        let mut state = self.lock();
        if state.pattern == pattern {
            return false;
        }
        state.pattern = pattern.to_string();
        state.generation += 1;
        true
    }

    /// Match the current pattern against `datapoints`.
    pub async fn run<B: Backend>(&self, backend: &B, datapoints: &[String]) -> RegexOutcome {
        let (pattern, generation) = {
            let mut state = self.lock();
            if state.pattern.trim().is_empty() || datapoints.is_empty() {
                return RegexOutcome::Skipped;
            }
            state.generation += 1;
            (state.pattern.clone(), state.generation)
        };
        tracing::debug!(%pattern, datapoints = datapoints.len(), "applying regex");

        let result = backend.apply_regex(&pattern, datapoints).await;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(%pattern, "discarding superseded regex results");
            return RegexOutcome::Superseded;
        }
        match result {
            Ok(results) => {
                let matches = results.len();
                tracing::info!(%pattern, matches, "regex applied");
                state.results = results;
                RegexOutcome::Applied { matches }
            }
            Err(error) => {
                tracing::warn!(%pattern, %error, "regex failed; keeping previous results");
                RegexOutcome::Failed
            }
        }
    }

    /// Column headers for the result table: named groups in first-seen
    /// order, then the full-match key.
    #[must_use]
    pub fn group_columns(&self) -> Vec<String> {
        let state = self.lock();
        let mut seen = HashSet::new();
        let mut columns: Vec<String> = state
            .results
            .iter()
            .filter_map(|m| m.groups.as_ref())
            .flat_map(|groups| groups.keys())
            .filter(|name| name.as_str() != FULL_MATCH && seen.insert(name.as_str()))
            .cloned()
            .collect();
        columns.push(FULL_MATCH.to_string());
        columns
    }

    fn lock(&self) -> MutexGuard<'_, RegexState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
