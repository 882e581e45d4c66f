//! Page arithmetic.
//!
//! [`Pagination`] is a ready-made [`Paginator`]: it stores the requested page,
//! the page size and the total item count, and derives everything else. The
//! requested page is clamped into the valid range once the item count is known.
//!
//! ```rust
//! use dto_serializer::{Pagination, Paginator};
//!
//! let pagination = Pagination::new(10).with_item_count(95).with_page(12);
//!
//! assert_eq!(pagination.page_count(), Some(10));
//! assert_eq!(pagination.page(), 10);
//! assert!(pagination.is_last());
//! assert_eq!(pagination.offset(), 90);
//! assert_eq!(pagination.length(), 5);
//! ```

use crate::{Object, Paginator};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pagination {
    base: i64,
    page: i64,
    items_per_page: i64,
    item_count: Option<i64>,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            base: 1,
            page: 1,
            items_per_page: 1,
            item_count: None,
        }
    }
}

impl Pagination {
    /// Creates a pagination with the given page size, starting at page 1.
    /// Page sizes below 1 are raised to 1.
    #[must_use]
    pub fn new(items_per_page: i64) -> Self {
        Pagination::default().with_items_per_page(items_per_page)
    }

    /// Sets the requested page. Clamping happens on read.
    #[must_use]
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub fn with_items_per_page(mut self, items_per_page: i64) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    /// Sets the total number of items. Negative counts are treated as zero.
    #[must_use]
    pub fn with_item_count(mut self, item_count: i64) -> Self {
        self.item_count = Some(item_count.max(0));
        self
    }

    /// Sets the number of the first page (1 by default).
    #[must_use]
    pub fn with_base(mut self, base: i64) -> Self {
        self.base = base;
        self
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub fn page_index(&self) -> i64 {
        let index = self.page.saturating_sub(self.base).max(0);
        match self.page_count() {
            Some(count) => index.min(count.saturating_sub(1).max(0)),
            None => index,
        }
    }

    /// Offset of the first item on the current page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.page_index().saturating_mul(self.items_per_page)
    }

    /// Number of items on the current page.
    #[must_use]
    pub fn length(&self) -> i64 {
        match self.item_count {
            Some(count) => self
                .items_per_page
                .min(count.saturating_sub(self.offset()))
                .max(0),
            None => self.items_per_page,
        }
    }
}

impl Paginator for Pagination {
    fn page(&self) -> i64 {
        self.base.saturating_add(self.page_index())
    }

    fn page_count(&self) -> Option<i64> {
        self.item_count.map(|count| {
            let pages = count / self.items_per_page;
            if count % self.items_per_page == 0 {
                pages
            } else {
                pages + 1
            }
        })
    }

    fn item_count(&self) -> Option<i64> {
        self.item_count
    }

    fn items_per_page(&self) -> i64 {
        self.items_per_page
    }

    fn first_page(&self) -> i64 {
        self.base
    }

    fn last_page(&self) -> Option<i64> {
        self.page_count()
            .map(|count| self.base.saturating_add(count.saturating_sub(1).max(0)))
    }

    fn is_first(&self) -> bool {
        self.page() == self.first_page()
    }

    fn is_last(&self) -> bool {
        match self.last_page() {
            Some(last) => self.page() == last,
            None => false,
        }
    }
}

impl Object for Pagination {
    fn as_paginator(&self) -> Option<&dyn Paginator> {
        Some(self)
    }
}
