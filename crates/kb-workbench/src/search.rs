//! Debounced, paginated ontology autocomplete.
//!
//! Every state change (query, page, refresh) bumps a generation counter and
//! hands back a [`Ticket`]. A fetch for a query edit waits out the debounce
//! window first; page moves and refreshes go straight out. The request is
//! issued only if its ticket is still current, and the response is applied
//! only if the ticket is *still* current when it resolves. Older
//! responses are dropped, so a slow page-1 answer can never overwrite the
//! page the user has since moved to.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use kb_client::Backend;
use kb_config::SearchConfig;
use kb_core::enums::OntologyKind;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub limit: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            limit: config.page_limit.max(1),
        }
    }
}

/// Generation a fetch was scheduled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    debounce: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchOutcome {
    Applied,
    /// The request failed; results were reset to empty.
    Failed,
    /// A newer state change overtook this fetch; nothing was applied.
    Superseded,
}

/// Read-only snapshot of a controller, as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub kind: OntologyKind,
    pub query: String,
    pub page: u32,
    pub items: Vec<String>,
    pub total: u64,
    pub total_pages: u64,
    pub can_prev: bool,
    pub can_next: bool,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    page: u32,
    items: Vec<String>,
    total: u64,
    loading: bool,
    generation: u64,
}

impl SearchState {
    fn total_pages(&self, limit: u32) -> u64 {
        self.total.div_ceil(u64::from(limit)).max(1)
    }

    fn bump(&mut self, debounce: bool) -> Ticket {
        self.generation += 1;
        Ticket {
            generation: self.generation,
            debounce,
        }
    }
}

#[derive(Debug)]
pub struct SearchController {
    kind: OntologyKind,
    settings: SearchSettings,
    state: Mutex<SearchState>,
}

impl SearchController {
    #[must_use]
    pub fn new(kind: OntologyKind, settings: SearchSettings) -> Self {
        Self {
            kind,
            settings,
            state: Mutex::new(SearchState {
                page: 1,
                ..SearchState::default()
            }),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> OntologyKind {
        self.kind
    }

    #[must_use]
    pub fn view(&self) -> SearchView {
        let state = self.lock();
        let total_pages = state.total_pages(self.settings.limit);
        SearchView {
            kind: self.kind,
            query: state.query.clone(),
            page: state.page,
            items: state.items.clone(),
            total: state.total,
            total_pages,
            can_prev: state.page > 1,
            can_next: u64::from(state.page) < total_pages,
            loading: state.loading,
        }
    }

    /// New query text; resets to page 1.
    pub fn set_query(&self, query: &str) -> Ticket {
        let mut state = self.lock();
        state.query = query.to_string();
        state.page = 1;
        state.bump(true)
    }

    /// Jump to `page` (clamped to at least 1).
    pub fn set_page(&self, page: u32) -> Ticket {
        let mut state = self.lock();
        state.page = page.max(1);
        state.bump(false)
    }

    /// Advance one page. `None` when already on the last page.
    pub fn next_page(&self) -> Option<Ticket> {
        let mut state = self.lock();
        if u64::from(state.page) >= state.total_pages(self.settings.limit) {
            return None;
        }
        state.page += 1;
        Some(state.bump(false))
    }

    /// Go back one page. `None` when on page 1.
    pub fn prev_page(&self) -> Option<Ticket> {
        let mut state = self.lock();
        if state.page <= 1 {
            return None;
        }
        state.page -= 1;
        Some(state.bump(false))
    }

    /// Re-request the current query and page (the ontology changed).
    pub fn refresh(&self) -> Ticket {
        self.lock().bump(false)
    }

    /// Item at `index` on the current page.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<String> {
        self.lock().items.get(index).cloned()
    }

    /// Fetch for `ticket`, debounced if it came from a query edit.
    pub async fn fetch<B: Backend>(&self, backend: &B, ticket: Ticket) -> FetchOutcome {
        if ticket.debounce {
            tokio::time::sleep(self.settings.debounce).await;
        }
        let (query, page) = {
            let mut state = self.lock();
            if state.generation != ticket.generation {
                return FetchOutcome::Superseded;
            }
            state.loading = true;
            (state.query.clone(), state.page)
        };

        let result = backend
            .list_ontology(self.kind, page, self.settings.limit, &query)
            .await;

        let mut state = self.lock();
        if state.generation != ticket.generation {
            tracing::debug!(kind = %self.kind, %query, page, "discarding stale search response");
            return FetchOutcome::Superseded;
        }
        state.loading = false;
        match result {
            Ok(found) => {
                tracing::debug!(kind = %self.kind, %query, page, total = found.total, "search applied");
                state.items = found.items;
                state.total = found.total;
                FetchOutcome::Applied
            }
            Err(error) => {
                tracing::warn!(kind = %self.kind, %query, page, %error, "search failed");
                state.items.clear();
                state.total = 0;
                FetchOutcome::Failed
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
