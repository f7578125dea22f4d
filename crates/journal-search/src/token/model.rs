//! Search token types.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::kind::TokenKind;

/// A single search predicate.
///
/// Tokens serialize to JSON as `{"type": "in", "value": "work"}`; the
/// `excluded` flag is only written when set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchToken {
    /// Documents in the journal with this display name.
    In {
        value: String,
        #[serde(default, skip_serializing_if = "is_false")]
        excluded: bool,
    },
    /// Documents carrying this (normalized) tag.
    Tag {
        value: String,
        #[serde(default, skip_serializing_if = "is_false")]
        excluded: bool,
    },
    /// Documents whose title contains this term.
    Title {
        value: String,
        #[serde(default, skip_serializing_if = "is_false")]
        excluded: bool,
    },
    /// Documents whose body contains this term. Also the fallback for
    /// unprefixed input.
    Text {
        value: String,
        #[serde(default, skip_serializing_if = "is_false")]
        excluded: bool,
    },
    /// Pagination cursor: the identifier of the first document of the page.
    Before { value: String },
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    Date { value: String },
    /// Legacy structural match on markdown nodes.
    Filter { value: NodeMatch },
    /// Legacy heading focus.
    Focus { value: FocusTarget },
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl SearchToken {
    pub fn journal(name: impl Into<String>) -> Self {
        Self::In {
            value: name.into(),
            excluded: false,
        }
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::Tag {
            value: value.into(),
            excluded: false,
        }
    }

    pub fn title(value: impl Into<String>) -> Self {
        Self::Title {
            value: value.into(),
            excluded: false,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
            excluded: false,
        }
    }

    pub fn before(cursor: impl Into<String>) -> Self {
        Self::Before {
            value: cursor.into(),
        }
    }

    pub fn date(value: impl Into<String>) -> Self {
        Self::Date {
            value: value.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Self::In { .. } => TokenKind::In,
            Self::Tag { .. } => TokenKind::Tag,
            Self::Title { .. } => TokenKind::Title,
            Self::Text { .. } => TokenKind::Text,
            Self::Before { .. } => TokenKind::Before,
            Self::Date { .. } => TokenKind::Date,
            Self::Filter { .. } => TokenKind::Filter,
            Self::Focus { .. } => TokenKind::Focus,
        }
    }

    pub fn is_excluded(&self) -> bool {
        match self {
            Self::In { excluded, .. }
            | Self::Tag { excluded, .. }
            | Self::Title { excluded, .. }
            | Self::Text { excluded, .. } => *excluded,
            Self::Before { .. } | Self::Date { .. } | Self::Filter { .. } | Self::Focus { .. } => {
                false
            }
        }
    }

    /// Marks the token as excluded (negative match).
    ///
    /// Only multi-valued predicates can be negated; singletons return `None`.
    pub fn excluded(self) -> Option<Self> {
        match self {
            Self::In { value, .. } => Some(Self::In {
                value,
                excluded: true,
            }),
            Self::Tag { value, .. } => Some(Self::Tag {
                value,
                excluded: true,
            }),
            Self::Title { value, .. } => Some(Self::Title {
                value,
                excluded: true,
            }),
            Self::Text { value, .. } => Some(Self::Text {
                value,
                excluded: true,
            }),
            Self::Before { .. } | Self::Date { .. } | Self::Filter { .. } | Self::Focus { .. } => {
                None
            }
        }
    }

    /// The plain string value, for the variants that carry one.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            Self::In { value, .. }
            | Self::Tag { value, .. }
            | Self::Title { value, .. }
            | Self::Text { value, .. }
            | Self::Before { value }
            | Self::Date { value } => Some(value.as_str()),
            Self::Filter { .. } | Self::Focus { .. } => None,
        }
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind().serialize(self))
    }
}

/// Match markdown nodes by type and, optionally, one attribute.
///
/// `filter:code` or `filter:code[lang="sql"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMatch {
    /// mdast node type, e.g. `code` or `heading`.
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusTarget {
    #[serde(rename = "type")]
    pub node_type: String,
    /// Heading text including its leading hashes, e.g. `## weekly review`.
    pub content: String,
    pub depth: HeadingDepth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingDepth {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingDepth {
    /// Depth for a run of `#` markers; `None` outside 1..=6.
    pub fn from_level(level: usize) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }
}
