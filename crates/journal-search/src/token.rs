//! Search tokens: the typed predicates a search is made of.
//!
//! This module provides:
//! - The token model (`SearchToken` and the legacy node/heading value shapes)
//! - Per-type handlers (`TokenKind`): parse, serialize, add and remove
//! - Value normalization for tags, dates, filters and focus headings

mod date;
mod filter;
mod focus;
mod kind;
mod model;
mod tag;

pub use date::{date_bounds, is_iso_date};
pub use filter::NODE_TYPES;
pub use kind::{MergePolicy, TokenKind};
pub use model::{FocusTarget, HeadingDepth, NodeMatch, SearchToken};
pub use tag::{normalize_tag, MAX_TAG_LENGTH};
