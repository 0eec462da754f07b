//! Cursor-paginated result pages.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::cursor::FeedCursor;
use super::id::PostId;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request parameters for a cursor-paginated query.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// Resume position, `None` for the first page.
    pub cursor: Option<FeedCursor>,
    /// Number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// Create a new page request; the limit is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(cursor: Option<FeedCursor>, limit: u32) -> Self {
        Self {
            cursor,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to fetch from the store: one extra sentinel row signals that
    /// another page exists.
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit) + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, DEFAULT_PAGE_SIZE)
    }
}

/// Anything that occupies a position in a newest-first listing.
pub trait Positioned {
    fn position(&self) -> (DateTime<Utc>, PostId);
}

/// One page of a newest-first listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    /// Token for the next page, present only when `has_more` is set.
    pub next_cursor: Option<String>,
}

impl<T: Positioned> Page<T> {
    /// Build a page from up to `limit + 1` rows, dropping the sentinel.
    pub fn from_probe(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let limit = request.limit as usize;
        let has_more = rows.len() > limit;
        rows.truncate(limit);
        let next_cursor = if has_more {
            rows.last().map(|last| {
                let (created_at, id) = last.position();
                FeedCursor::after(created_at, id).encode()
            })
        } else {
            None
        };
        Self {
            items: rows,
            has_more,
            next_cursor,
        }
    }
}

impl<T> Page<T> {
    /// Transform every item, keeping the pagination state.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            has_more: self.has_more,
            next_cursor: self.next_cursor,
        }
    }
}
