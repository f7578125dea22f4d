//! Collaborators the search engine consumes.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::error::Result;
use crate::query::SearchQuery;
use crate::types::SearchResponse;

/// Executes compiled queries.
///
/// Results are ordered newest first. `limit` caps the number of documents;
/// `before`, when set, names the document the page starts at: the store
/// returns that document and the ones ordered after it.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// Resolves journal display names to stable identifiers.
pub trait JournalDirectory: Send + Sync {
    fn id_for_name(&self, name: &str) -> Option<String>;
}

impl JournalDirectory for HashMap<String, String> {
    fn id_for_name(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl JournalDirectory for BTreeMap<String, String> {
    fn id_for_name(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Receives the serialized tokens whenever the collection should be persisted
/// (e.g. written back to the URL as repeated `search` parameters).
pub trait TokenPersistence: Send + Sync {
    fn persist(&self, search_tokens: &[String]);
}

impl<F> TokenPersistence for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn persist(&self, search_tokens: &[String]) {
        (self)(search_tokens)
    }
}
