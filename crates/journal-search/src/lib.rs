//! Search query token engine for journal documents.
//!
//! This crate provides:
//! - A typed token model with per-kind parse, serialize and merge rules
//! - Parsing of `[-]prefix:value` terms and free-form search lines
//! - Compilation of token collections into store queries
//! - A search session with keyset pagination and stale-response discarding

pub mod config;
pub mod error;
pub mod events;
pub mod pagination;
pub mod query;
pub mod sequence;
pub mod session;
pub mod state;
pub mod store;
pub mod token;
pub mod types;

// Re-export main types
pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use events::{SearchBus, SearchEvent};
pub use query::{
    compile_query, parse_search_input, parse_token, parse_tokens, serialize_token,
    serialize_tokens, SearchQuery,
};
pub use session::{SearchOutcome, SearchSession};
pub use state::SearchState;
pub use store::{DocumentStore, JournalDirectory, TokenPersistence};
pub use token::{SearchToken, TokenKind};
pub use types::{Document, SearchResponse};
