//! Query grammar and compilation.
//!
//! This module provides:
//! - Splitting a free-form search line into raw terms
//! - The `[-]prefix:value` grammar and collection operations (merge, remove)
//! - Compilation of a token collection into a store query

mod compiler;
mod input;
mod parser;

pub use compiler::{compile_query, BeforeFormat, SearchQuery};
pub use input::split_search_input;
pub use parser::{
    merge_token, parse_search_input, parse_token, parse_tokens, remove_token, serialize_token,
    serialize_tokens,
};
