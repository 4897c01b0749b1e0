//! Cursor-based pagination.
//!
//! Every upstream source the pipeline reads is paginated the same way: a
//! request takes an opaque cursor (none for the first page) and the response
//! carries a page of items plus a `pageInfo` with `hasNextPage` and
//! `endCursor`. [`Paginator`] turns such a fetch function into a lazy
//! iterator over individual items.
//!
//! ```
//! use enterprise_roster::pagination::{Page, PageInfo, Paginator};
//!
//! let pages = vec![vec![1, 2], vec![3]];
//! let logins: Vec<i32> = Paginator::new(|cursor: Option<&str>| {
//!     let index: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
//!     let has_next_page = index + 1 < pages.len();
//!     Ok(Page {
//!         items: pages[index].clone(),
//!         page_info: PageInfo {
//!             has_next_page,
//!             end_cursor: has_next_page.then(|| (index + 1).to_string()),
//!         },
//!     })
//! })
//! .collect::<Result<_, _>>()
//! .unwrap();
//! assert_eq!(logins, vec![1, 2, 3]);
//! ```

use std::collections::VecDeque;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Page information returned alongside every page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether another page follows this one.
    pub has_next_page: bool,
    /// Cursor to pass to fetch the next page.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Page info for the final page.
    pub fn last() -> Self {
        Self::default()
    }

    /// Page info pointing at a following page.
    pub fn next(cursor: impl Into<String>) -> Self {
        Self {
            has_next_page: true,
            end_cursor: Some(cursor.into()),
        }
    }
}

/// One page of items from a paginated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }
}

/// Lazy iterator over the items of a cursor-paginated source.
///
/// The first fetch receives `None`; every following fetch receives the
/// previous page's `end_cursor`. A fetch error is yielded once and the
/// iterator is exhausted afterwards, so callers see either every item or a
/// prefix followed by the error.
pub struct Paginator<T, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>>,
{
    fetch: F,
    buffer: VecDeque<T>,
    cursor: Option<String>,
    pages_fetched: usize,
    finished: bool,
}

impl<T, F> Paginator<T, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffer: VecDeque::new(),
            cursor: None,
            pages_fetched: 0,
            finished: false,
        }
    }

    /// Number of pages requested so far.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch_next_page(&mut self) -> Result<()> {
        let page = (self.fetch)(self.cursor.as_deref())?;
        self.pages_fetched += 1;
        self.buffer.extend(page.items);

        if !page.page_info.has_next_page {
            self.finished = true;
            return Ok(());
        }

        match page.page_info.end_cursor {
            None => Err(Error::Pagination {
                message: format!(
                    "page {} reports a next page but no end cursor",
                    self.pages_fetched
                ),
            }),
            Some(next) if self.cursor.as_deref() == Some(next.as_str()) => {
                Err(Error::Pagination {
                    message: format!(
                        "page {} returned the same cursor it was requested with: {}",
                        self.pages_fetched, next
                    ),
                })
            }
            Some(next) => {
                self.cursor = Some(next);
                Ok(())
            }
        }
    }
}

impl<T, F> Iterator for Paginator<T, F>
where
    F: FnMut(Option<&str>) -> Result<Page<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.fetch_next_page() {
                // Items already buffered from the failing page are dropped:
                // the page is reported as failed as a whole.
                self.buffer.clear();
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}

impl<T, F> std::iter::FusedIterator for Paginator<T, F> where
    F: FnMut(Option<&str>) -> Result<Page<T>>
{
}
