//! Keyset pagination state.
//!
//! The store only pages forward: a `before:` cursor names the first document
//! of a page. Going back is an undo stack of the cursors of previously visited
//! pages, where `None` stands for the first page (no cursor).

use crate::types::Document;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    next_id: Option<String>,
    last_ids: Vec<Option<String>>,
}

/// Where [`Pagination::retreat`] wants the cursor to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageTarget {
    /// Set the `before:` cursor to this document id.
    Cursor(String),
    /// Remove the `before:` cursor: back to the first page.
    FirstPage,
}

impl Pagination {
    /// Number of documents to request for a page of `page_size`: one extra
    /// reveals whether a next page exists.
    pub fn request_limit(page_size: usize) -> usize {
        page_size.saturating_add(1)
    }

    pub fn has_next(&self) -> bool {
        self.next_id.is_some()
    }

    pub fn has_prev(&self) -> bool {
        !self.last_ids.is_empty()
    }

    pub fn next_id(&self) -> Option<&str> {
        self.next_id.as_deref()
    }

    /// Forgets the visited pages. Filters changed, so their cursors no longer
    /// describe this result set.
    pub fn reset(&mut self) {
        self.last_ids.clear();
    }

    /// Records a page fetched with [`Pagination::request_limit`].
    ///
    /// When the store returned more than `page_size` documents, the overflow
    /// document becomes the next cursor and is removed from `docs`.
    pub fn record_page(&mut self, docs: &mut Vec<Document>, page_size: usize) {
        if docs.len() > page_size {
            self.next_id = docs.last().map(|doc| doc.id.clone());
            docs.truncate(page_size);
        } else {
            self.next_id = None;
        }
    }

    /// Moves forward. `current` is the cursor of the page being left (`None`
    /// on the first page). Returns the cursor of the next page, or `None` when
    /// there is no next page.
    ///
    /// The cursor is consumed: there is no next page until the page it opens
    /// has been recorded.
    pub fn advance(&mut self, current: Option<String>) -> Option<String> {
        let next = self.next_id.take()?;
        self.last_ids.push(current);
        Some(next)
    }

    /// Moves back one page; `None` when there is nothing to go back to.
    pub fn retreat(&mut self) -> Option<PageTarget> {
        let previous = self.last_ids.pop()?;
        Some(match previous {
            Some(cursor) => PageTarget::Cursor(cursor),
            None => PageTarget::FirstPage,
        })
    }
}
