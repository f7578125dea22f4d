//! Projection of a token collection into the query handed to the document store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::{Uuid, Variant};

use crate::store::JournalDirectory;
use crate::token::{date_bounds, SearchToken};

/// The abstract query a [`DocumentStore`](crate::store::DocumentStore) executes.
///
/// Empty lists mean "no filter": an empty `journals` list matches every
/// journal, it never matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Journal identifiers (already resolved from display names).
    pub journals: Vec<String>,
    pub tags: Vec<String>,
    pub titles: Vec<String>,
    pub texts: Vec<String>,
    /// Pagination cursor: the page starts at this document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    /// Maximum number of documents to return.
    pub limit: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_journals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_titles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_texts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// What a `before:` cursor looks like, which decides the column a store
/// orders and compares on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeFormat {
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`: compare against creation time.
    Date,
    /// A document UUID: compare against the id.
    Id,
    Unknown,
}

impl SearchQuery {
    pub fn before_format(&self) -> Option<BeforeFormat> {
        self.before.as_deref().map(classify_before)
    }

    /// Inclusive calendar range selected by the `date:` token, if it names a
    /// real date.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.date.as_deref().and_then(date_bounds)
    }

    /// True when the query carries no filter at all (cursor and limit aside).
    pub fn is_unfiltered(&self) -> bool {
        self.journals.is_empty()
            && self.tags.is_empty()
            && self.titles.is_empty()
            && self.texts.is_empty()
            && self.exclude_journals.is_empty()
            && self.exclude_tags.is_empty()
            && self.exclude_titles.is_empty()
            && self.exclude_texts.is_empty()
            && self.date.is_none()
    }
}

/// Compiles tokens into a [`SearchQuery`].
///
/// Journal names that no longer resolve are skipped. `filter:` and `focus:`
/// tokens have no query counterpart and are ignored.
pub fn compile_query<D>(tokens: &[SearchToken], directory: &D, limit: usize) -> SearchQuery
where
    D: JournalDirectory + ?Sized,
{
    let mut query = SearchQuery {
        limit,
        ..SearchQuery::default()
    };

    for token in tokens {
        match token {
            SearchToken::In { value, excluded } => {
                let Some(id) = directory.id_for_name(value) else {
                    log::debug!("search query skipped unresolved journal name={value}");
                    continue;
                };
                if *excluded {
                    query.exclude_journals.push(id);
                } else {
                    query.journals.push(id);
                }
            }
            SearchToken::Tag { value, excluded } => {
                let target = if *excluded {
                    &mut query.exclude_tags
                } else {
                    &mut query.tags
                };
                target.push(value.clone());
            }
            SearchToken::Title { value, excluded } => {
                let target = if *excluded {
                    &mut query.exclude_titles
                } else {
                    &mut query.titles
                };
                target.push(value.clone());
            }
            SearchToken::Text { value, excluded } => {
                let target = if *excluded {
                    &mut query.exclude_texts
                } else {
                    &mut query.texts
                };
                target.push(value.clone());
            }
            SearchToken::Before { value } => query.before = Some(value.clone()),
            SearchToken::Date { value } => query.date = Some(value.clone()),
            SearchToken::Filter { .. } | SearchToken::Focus { .. } => {}
        }
    }

    query
}

fn classify_before(value: &str) -> BeforeFormat {
    if crate::token::is_iso_date(value) {
        BeforeFormat::Date
    } else if is_uuid(value) {
        BeforeFormat::Id
    } else {
        BeforeFormat::Unknown
    }
}

/// Hyphenated RFC 4122 UUID, versions 1 through 5.
fn is_uuid(value: &str) -> bool {
    // `try_parse` also accepts the simple, braced and URN forms.
    if value.len() != 36 {
        return false;
    }

    match Uuid::try_parse(value) {
        Ok(id) => (1..=5).contains(&id.get_version_num()) && id.get_variant() == Variant::RFC4122,
        Err(_) => false,
    }
}
