//! A search context: token state, paging and result delivery.
//!
//! Token mutations are synchronous under one lock; only the store call is
//! awaited, and never with the lock held. Each search takes a version from
//! [`SearchVersionTracker`] and its response is applied only while that
//! version is still the newest.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::events::{SearchBus, SearchEvent};
use crate::pagination::{PageTarget, Pagination};
use crate::query::SearchQuery;
use crate::sequence::SearchVersionTracker;
use crate::state::SearchState;
use crate::store::{DocumentStore, JournalDirectory, TokenPersistence};
use crate::token::{SearchToken, TokenKind};
use crate::types::Document;

const EVENT_CAPACITY: usize = 64;

/// What happened to a requested search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The page was applied.
    Completed { count: usize, has_next: bool },
    /// A newer search started while this one was in flight; its response was
    /// dropped.
    Superseded,
    /// Nothing changed, so no search was issued.
    Skipped,
}

struct SessionInner {
    state: SearchState,
    pagination: Pagination,
    docs: Vec<Document>,
    loading: bool,
    error: Option<String>,
}

pub struct SearchSession {
    inner: Mutex<SessionInner>,
    store: Arc<dyn DocumentStore>,
    persistence: Option<Arc<dyn TokenPersistence>>,
    versions: SearchVersionTracker,
    events: SearchBus,
    config: SearchConfig,
}

impl SearchSession {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        directory: Arc<dyn JournalDirectory>,
        config: SearchConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Mutex::new(SessionInner {
                state: SearchState::new(directory),
                pagination: Pagination::default(),
                docs: Vec::new(),
                loading: false,
                error: None,
            }),
            store,
            persistence: None,
            versions: SearchVersionTracker::new(),
            events: SearchBus::new(EVENT_CAPACITY),
            config,
        })
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn TokenPersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Seeds the token collection from persisted strings (e.g. the `search`
    /// parameters of a URL). Nothing is persisted or searched.
    pub fn with_initial_tokens<S: AsRef<str>>(mut self, raws: &[S]) -> Self {
        let inner = self.inner.get_mut();
        for raw in raws {
            inner.state.add_token(raw.as_ref());
        }
        self
    }

    // -----------------------------------------------------------------------
    // Token mutations
    // -----------------------------------------------------------------------

    /// Parses `raw`, merges it in and searches from the first page.
    ///
    /// Returns [`SearchOutcome::Skipped`] without searching when `raw` does
    /// not parse or the token is already present; call [`Self::search`] to
    /// refresh unconditionally.
    pub async fn add_token(&self, raw: &str) -> Result<SearchOutcome> {
        self.mutate(|state| state.add_token(raw)).await
    }

    /// Removes the token `raw` parses to and searches from the first page.
    ///
    /// Returns [`SearchOutcome::Skipped`] without searching when no such token
    /// is present.
    pub async fn remove_token(&self, raw: &str) -> Result<SearchOutcome> {
        self.mutate(|state| state.remove_token(raw)).await
    }

    /// Replaces the collection with the tokens `raws` parse to. Skipped when
    /// the serialized form is unchanged.
    pub async fn set_search<S: AsRef<str>>(&self, raws: &[S]) -> Result<SearchOutcome> {
        self.mutate(|state| state.set_search(raws)).await
    }

    /// Replaces the collection and always searches. The tokens go through the
    /// merge rules, so duplicates collapse and the last singleton wins.
    pub async fn set_tokens(&self, tokens: Vec<SearchToken>) -> Result<SearchOutcome> {
        self.mutate(|state| {
            state.set_tokens(tokens);
            true
        })
        .await
    }

    async fn mutate<F>(&self, apply: F) -> Result<SearchOutcome>
    where
        F: FnOnce(&mut SearchState) -> bool,
    {
        let search_tokens = {
            let mut inner = self.inner.lock();
            if !apply(&mut inner.state) {
                return Ok(SearchOutcome::Skipped);
            }
            inner.pagination.reset();
            inner.state.search_tokens()
        };
        self.tokens_changed(search_tokens);
        self.run_search().await
    }

    // -----------------------------------------------------------------------
    // Paging
    // -----------------------------------------------------------------------

    /// Searches the current tokens from a fresh paging history.
    pub async fn search(&self) -> Result<SearchOutcome> {
        self.inner.lock().pagination.reset();
        self.run_search().await
    }

    /// Moves to the next page. Skipped when there is none.
    pub async fn next(&self) -> Result<SearchOutcome> {
        let search_tokens = {
            let mut inner = self.inner.lock();
            let current = inner.state.before().map(str::to_string);
            let Some(next_id) = inner.pagination.advance(current) else {
                return Ok(SearchOutcome::Skipped);
            };
            inner.state.merge(SearchToken::before(next_id));
            inner.state.search_tokens()
        };
        self.tokens_changed(search_tokens);
        self.run_search().await
    }

    /// Moves back one page. Skipped on the first page.
    pub async fn prev(&self) -> Result<SearchOutcome> {
        let search_tokens = {
            let mut inner = self.inner.lock();
            let Some(target) = inner.pagination.retreat() else {
                return Ok(SearchOutcome::Skipped);
            };
            match target {
                PageTarget::Cursor(cursor) => inner.state.merge(SearchToken::before(cursor)),
                PageTarget::FirstPage => inner.state.remove_kind(TokenKind::Before),
            };
            inner.state.search_tokens()
        };
        self.tokens_changed(search_tokens);
        self.run_search().await
    }

    async fn run_search(&self) -> Result<SearchOutcome> {
        let page_size = self.config.page_size;
        let (version, query) = {
            let mut inner = self.inner.lock();
            inner.loading = true;
            inner.error = None;
            let query = inner.state.compile(Pagination::request_limit(page_size));
            (self.versions.next_version(), query)
        };
        log::debug!(
            "search started version={} limit={} before={:?}",
            version,
            query.limit,
            query.before
        );

        let result = self.store.search(&query).await;

        let mut inner = self.inner.lock();
        if self.versions.is_current(version).is_none() {
            log::debug!("search discarded stale response version={version}");
            return Ok(SearchOutcome::Superseded);
        }
        inner.loading = false;

        match result {
            Ok(response) => {
                let mut docs = response.data;
                inner.pagination.record_page(&mut docs, page_size);
                let count = docs.len();
                let has_next = inner.pagination.has_next();
                let has_prev = inner.pagination.has_prev();
                inner.docs = docs;
                drop(inner);

                log::debug!("search completed version={version} count={count} has_next={has_next}");
                self.events.publish(SearchEvent::ResultsChanged {
                    version,
                    count,
                    has_next,
                    has_prev,
                });
                Ok(SearchOutcome::Completed { count, has_next })
            }
            Err(error) => {
                let message = error.to_string();
                inner.error = Some(message.clone());
                drop(inner);

                log::warn!("search failed version={version} error={message}");
                self.events
                    .publish(SearchEvent::SearchFailed { version, message });
                Err(error)
            }
        }
    }

    fn tokens_changed(&self, search_tokens: Vec<String>) {
        if let Some(persistence) = &self.persistence {
            persistence.persist(&search_tokens);
        }
        self.events
            .publish(SearchEvent::TokensChanged { search_tokens });
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn tokens(&self) -> Vec<SearchToken> {
        self.inner.lock().state.tokens().to_vec()
    }

    pub fn search_tokens(&self) -> Vec<String> {
        self.inner.lock().state.search_tokens()
    }

    pub fn selected_journals(&self) -> Vec<String> {
        self.inner.lock().state.selected_journals()
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.inner.lock().state.selected_tags()
    }

    /// The query the next search would send.
    pub fn query(&self) -> SearchQuery {
        let limit = Pagination::request_limit(self.config.page_size);
        self.inner.lock().state.compile(limit)
    }

    /// Documents of the current page.
    pub fn docs(&self) -> Vec<Document> {
        self.inner.lock().docs.clone()
    }

    /// Message of the last failed search, cleared when the next one starts.
    pub fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.lock().loading
    }

    pub fn has_next(&self) -> bool {
        self.inner.lock().pagination.has_next()
    }

    pub fn has_prev(&self) -> bool {
        self.inner.lock().pagination.has_prev()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }
}
