//! Search session configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Number of documents shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    /// Documents displayed per page. The store is always asked for one more
    /// so the session can tell whether a next page exists.
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    /// Parses a JSON config document, filling missing fields with defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(SearchError::InvalidConfig(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
