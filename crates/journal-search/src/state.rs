//! The live token collection of one search context.

use std::sync::Arc;

use crate::query::{
    compile_query, merge_token, parse_token, parse_tokens, remove_token, serialize_tokens,
    SearchQuery,
};
use crate::store::JournalDirectory;
use crate::token::{SearchToken, TokenKind};

/// Ordered, deduplicated set of active search tokens.
///
/// All mutation goes through the token handlers, so the collection never holds
/// two singletons of one kind or two equal multi-valued tokens.
pub struct SearchState {
    tokens: Vec<SearchToken>,
    directory: Arc<dyn JournalDirectory>,
}

impl std::fmt::Debug for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchState")
            .field("tokens", &self.tokens)
            .field("directory", &"<journal directory>")
            .finish()
    }
}

impl SearchState {
    pub fn new(directory: Arc<dyn JournalDirectory>) -> Self {
        Self {
            tokens: Vec::new(),
            directory,
        }
    }

    /// Seeds a collection from persisted token strings.
    pub fn from_persisted<S: AsRef<str>>(directory: Arc<dyn JournalDirectory>, raws: &[S]) -> Self {
        let mut state = Self::new(directory);
        for raw in raws {
            state.add_token(raw.as_ref());
        }
        state
    }

    pub fn tokens(&self) -> &[SearchToken] {
        &self.tokens
    }

    /// Replaces the whole collection.
    ///
    /// The tokens are merged in order, so duplicates collapse and the last
    /// singleton of a kind wins. `in` tokens naming journals the directory
    /// cannot resolve are dropped.
    pub fn set_tokens(&mut self, tokens: Vec<SearchToken>) {
        let merged = tokens.into_iter().fold(Vec::new(), merge_token);
        self.tokens = self.retain_known_journals(merged);
    }

    /// Parses `raw` and merges it in. Returns whether the collection changed.
    pub fn add_token(&mut self, raw: &str) -> bool {
        match parse_token(raw) {
            Some(token) => self.merge(token),
            None => false,
        }
    }

    /// Merges an already parsed token. Returns whether the collection changed.
    pub fn merge(&mut self, token: SearchToken) -> bool {
        let merged = merge_token(self.tokens.clone(), token);
        self.replace_if_changed(merged)
    }

    /// Parses `raw` and removes the matching token. Absent or unparseable
    /// input is a no-op. Returns whether the collection changed.
    pub fn remove_token(&mut self, raw: &str) -> bool {
        let remaining = remove_token(self.tokens.clone(), raw);
        self.replace_if_changed(remaining)
    }

    /// Removes every token of `kind`. Returns whether the collection changed.
    pub fn remove_kind(&mut self, kind: TokenKind) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|token| token.kind() != kind);
        self.tokens.len() != before
    }

    /// Replaces the collection with the tokens `raws` parse to.
    ///
    /// Returns false, leaving the collection untouched, when the result
    /// serializes to the same set of strings as the current collection
    /// (ignoring order).
    pub fn set_search<S: AsRef<str>>(&mut self, raws: &[S]) -> bool {
        let merged = parse_tokens(raws).into_iter().fold(Vec::new(), merge_token);
        let candidate = self.retain_known_journals(merged);

        let mut current = serialize_tokens(&self.tokens);
        let mut next = serialize_tokens(&candidate);
        current.sort();
        next.sort();
        if current == next {
            return false;
        }

        self.tokens = candidate;
        true
    }

    /// Serialized form of every token, in collection order.
    pub fn search_tokens(&self) -> Vec<String> {
        serialize_tokens(&self.tokens)
    }

    /// Names of the journals searched in (exclusions left out).
    pub fn selected_journals(&self) -> Vec<String> {
        self.included_values(TokenKind::In)
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.included_values(TokenKind::Tag)
    }

    pub fn titles(&self) -> Vec<String> {
        self.included_values(TokenKind::Title)
    }

    pub fn texts(&self) -> Vec<String> {
        self.included_values(TokenKind::Text)
    }

    /// Current pagination cursor.
    pub fn before(&self) -> Option<&str> {
        self.singleton_value(TokenKind::Before)
    }

    pub fn date(&self) -> Option<&str> {
        self.singleton_value(TokenKind::Date)
    }

    /// Compiles the collection into a store query.
    pub fn compile(&self, limit: usize) -> SearchQuery {
        compile_query(&self.tokens, self.directory.as_ref(), limit)
    }

    fn replace_if_changed(&mut self, tokens: Vec<SearchToken>) -> bool {
        let tokens = self.retain_known_journals(tokens);
        if tokens == self.tokens {
            return false;
        }
        self.tokens = tokens;
        true
    }

    fn retain_known_journals(&self, mut tokens: Vec<SearchToken>) -> Vec<SearchToken> {
        tokens.retain(|token| match token {
            SearchToken::In { value, .. } => {
                let known = self.directory.id_for_name(value).is_some();
                if !known {
                    log::debug!("search dropped token for unknown journal name={value}");
                }
                known
            }
            _ => true,
        });
        tokens
    }

    fn included_values(&self, kind: TokenKind) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|token| token.kind() == kind && !token.is_excluded())
            .filter_map(|token| token.text_value().map(str::to_string))
            .collect()
    }

    fn singleton_value(&self, kind: TokenKind) -> Option<&str> {
        self.tokens
            .iter()
            .find(|token| token.kind() == kind)
            .and_then(SearchToken::text_value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn directory() -> Arc<dyn JournalDirectory> {
        Arc::new(HashMap::from([
            ("work".to_string(), "journal-1".to_string()),
            ("home".to_string(), "journal-2".to_string()),
        ]))
    }

    #[test]
    fn starts_empty() {
        let state = SearchState::new(directory());
        assert!(state.tokens().is_empty());
        assert!(state.search_tokens().is_empty());
        assert!(state.compile(10).journals.is_empty());
    }

    #[test]
    fn set_tokens_drops_unknown_journals_only() {
        let mut state = SearchState::new(directory());
        state.set_tokens(vec![
            SearchToken::journal("work"),
            SearchToken::journal("deleted"),
            SearchToken::tag("urgent"),
            SearchToken::before("doc-3"),
            SearchToken::journal("deleted").excluded().unwrap(),
        ]);

        assert_eq!(
            state.tokens(),
            &[
                SearchToken::journal("work"),
                SearchToken::tag("urgent"),
                SearchToken::before("doc-3"),
            ]
        );
    }

    #[test]
    fn set_tokens_collapses_duplicates() {
        let mut state = SearchState::new(directory());
        state.set_tokens(vec![
            SearchToken::before("a"),
            SearchToken::before("b"),
            SearchToken::journal("work"),
            SearchToken::journal("work"),
        ]);

        assert_eq!(state.search_tokens(), vec!["before:b", "in:work"]);
        assert_eq!(state.before(), Some("b"));
        assert_eq!(state.compile(10).before.as_deref(), Some("b"));
        assert_eq!(state.compile(10).journals, vec!["journal-1"]);

        assert!(state.merge(SearchToken::before("c")));
        assert_eq!(state.search_tokens(), vec!["in:work", "before:c"]);
    }

    #[test]
    fn add_token_reports_changes() {
        let mut state = SearchState::new(directory());
        assert!(state.add_token("in:work"));
        assert!(!state.add_token("in:work"));
        assert!(!state.add_token("in:nowhere"));
        assert!(!state.add_token("color:red"));
        assert_eq!(state.search_tokens(), vec!["in:work"]);
    }

    #[test]
    fn remove_token_reports_changes() {
        let mut state = SearchState::from_persisted(directory(), &["in:work", "tag:urgent"]);
        assert!(!state.remove_token("in:doesnotexist"));
        assert!(state.remove_token("tag:#Urgent"));
        assert_eq!(state.search_tokens(), vec!["in:work"]);
    }

    #[test]
    fn seeding_applies_merge_rules_and_journal_filter() {
        let state = SearchState::from_persisted(
            directory(),
            &["in:work", "in:work", "in:gone", "before:a", "before:b", "budget"],
        );
        assert_eq!(
            state.search_tokens(),
            vec!["in:work", "before:b", "text:budget"]
        );
    }

    #[test]
    fn set_search_ignores_reordering() {
        let mut state = SearchState::from_persisted(directory(), &["in:work", "tag:urgent"]);
        assert!(!state.set_search(&["tag:urgent", "in:work"]));
        assert_eq!(state.search_tokens(), vec!["in:work", "tag:urgent"]);

        assert!(state.set_search(&["in:home"]));
        assert_eq!(state.search_tokens(), vec!["in:home"]);
    }

    #[test]
    fn set_search_compares_after_normalization() {
        let mut state = SearchState::from_persisted(directory(), &["tag:my_tag"]);
        assert!(!state.set_search(&["tag:#My Tag"]));
        assert!(!state.set_search(&["tag:my_tag", "in:unknown"]));
    }

    #[test]
    fn projections_filter_by_kind() {
        let state = SearchState::from_persisted(
            directory(),
            &[
                "in:work",
                "-in:home",
                "tag:a",
                "title:standup",
                "text:budget",
                "before:doc-9",
                "date:2024",
            ],
        );

        assert_eq!(state.selected_journals(), vec!["work"]);
        assert_eq!(state.selected_tags(), vec!["a"]);
        assert_eq!(state.titles(), vec!["standup"]);
        assert_eq!(state.texts(), vec!["budget"]);
        assert_eq!(state.before(), Some("doc-9"));
        assert_eq!(state.date(), Some("2024"));
    }

    #[test]
    fn remove_kind_clears_cursor() {
        let mut state = SearchState::from_persisted(directory(), &["in:work", "before:doc-9"]);
        assert!(state.remove_kind(TokenKind::Before));
        assert!(!state.remove_kind(TokenKind::Before));
        assert_eq!(state.before(), None);
    }

    #[test]
    fn compile_resolves_journal_ids() {
        let state = SearchState::from_persisted(directory(), &["in:home", "in:work"]);
        let query = state.compile(21);
        assert_eq!(query.journals, vec!["journal-2", "journal-1"]);
        assert_eq!(query.limit, 21);
    }
}
