//! Per-type token handlers.
//!
//! Every predicate type knows how to parse the text after its prefix, how to
//! serialize a token back into that text, and how a token merges into (or is
//! removed from) a token collection. Dispatch is an exhaustive `match`, so a new
//! variant cannot be added without its handler.

use super::date::is_iso_date;
use super::filter::{format_node_match, parse_node_match};
use super::focus::parse_heading;
use super::model::SearchToken;
use super::tag::normalize_tag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    In,
    Tag,
    Title,
    Text,
    Before,
    Date,
    Filter,
    Focus,
}

/// How a token of a given type combines with tokens already in a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Any number of tokens, deduplicated by value.
    MultiValued,
    /// At most one token; a new value replaces the old one.
    Singleton,
}

impl TokenKind {
    pub const ALL: [TokenKind; 8] = [
        TokenKind::In,
        TokenKind::Tag,
        TokenKind::Title,
        TokenKind::Text,
        TokenKind::Before,
        TokenKind::Date,
        TokenKind::Filter,
        TokenKind::Focus,
    ];

    /// The text preceding `:` in the serialized form.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Tag => "tag",
            Self::Title => "title",
            Self::Text => "text",
            Self::Before => "before",
            Self::Date => "date",
            Self::Filter => "filter",
            Self::Focus => "focus",
        }
    }

    /// Looks up a prefix (case-insensitive, without the trailing colon).
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.prefix().eq_ignore_ascii_case(prefix))
    }

    pub fn merge_policy(self) -> MergePolicy {
        match self {
            Self::In | Self::Tag | Self::Title | Self::Text => MergePolicy::MultiValued,
            Self::Before | Self::Date | Self::Filter | Self::Focus => MergePolicy::Singleton,
        }
    }

    /// Parses the value that followed this kind's prefix.
    ///
    /// Returns `None` for empty or invalid input; callers drop the term.
    pub fn parse(self, raw: &str) -> Option<SearchToken> {
        if raw.is_empty() {
            return None;
        }

        match self {
            Self::In => Some(SearchToken::journal(raw)),
            Self::Tag => normalize_tag(raw).map(SearchToken::tag),
            Self::Title => Some(SearchToken::title(raw)),
            Self::Text => Some(SearchToken::text(raw)),
            Self::Before => Some(SearchToken::before(raw)),
            Self::Date => {
                if is_iso_date(raw) {
                    Some(SearchToken::date(raw))
                } else {
                    log::debug!("search dropped date term with invalid format value={raw}");
                    None
                }
            }
            Self::Filter => parse_node_match(raw).map(|value| SearchToken::Filter { value }),
            Self::Focus => Some(SearchToken::Focus {
                value: parse_heading(raw),
            }),
        }
    }

    /// Serializes a token of this kind as `[-]prefix:value`.
    pub fn serialize(self, token: &SearchToken) -> String {
        debug_assert_eq!(token.kind(), self, "token serialized by the wrong handler");

        let value = match token {
            SearchToken::Filter { value } => format_node_match(value),
            SearchToken::Focus { value } => value.content.clone(),
            other => other.text_value().unwrap_or_default().to_string(),
        };
        let negation = if token.is_excluded() { "-" } else { "" };
        format!("{negation}{}:{value}", self.prefix())
    }

    /// Merges `token` into `tokens` according to this kind's policy.
    pub fn add(self, mut tokens: Vec<SearchToken>, token: SearchToken) -> Vec<SearchToken> {
        debug_assert_eq!(token.kind(), self, "token merged by the wrong handler");

        match self.merge_policy() {
            MergePolicy::MultiValued => {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
            MergePolicy::Singleton => {
                match tokens.iter().position(|existing| existing.kind() == self) {
                    Some(index) if tokens[index] == token => {}
                    Some(index) => {
                        tokens.remove(index);
                        tokens.push(token);
                    }
                    None => tokens.push(token),
                }
            }
        }
        tokens
    }

    /// Removes `token` from `tokens` according to this kind's policy.
    ///
    /// Multi-valued kinds remove only equal tokens; singleton kinds remove the
    /// token of that kind whatever its value.
    pub fn remove(self, mut tokens: Vec<SearchToken>, token: &SearchToken) -> Vec<SearchToken> {
        match self.merge_policy() {
            MergePolicy::MultiValued => tokens.retain(|existing| existing != token),
            MergePolicy::Singleton => tokens.retain(|existing| existing.kind() != self),
        }
        tokens
    }
}
