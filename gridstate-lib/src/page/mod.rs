//! Pagination: the active page window, lazy-load requests and the
//! virtual-scroll page cache.

mod virtual_scroll;

pub use virtual_scroll::*;

use std::ops::Range;

use crate::filter::FilterSet;
use crate::sort::SortSpec;

/// The active page of a table.
///
/// `offset` is the index of the first visible row and `length` the page
/// size. `total` is the number of rows the pages are cut from: the processed
/// rows locally, or the collaborator's count in lazy mode.
///
/// # Example
///
/// ```
/// use gridstate_lib::page::PageWindow;
///
/// let mut window = PageWindow::new(10);
/// window.set_total(35);
/// assert_eq!(window.page_count(), 4);
///
/// window.go_to_page(3);
/// assert_eq!(window.offset(), 30);
/// assert_eq!(window.range(35), 30..35);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: usize,
    length: usize,
    total: usize,
}

impl PageWindow {
    /// Creates a window on the first page.
    pub fn new(length: usize) -> Self {
        Self {
            offset: 0,
            length,
            total: 0,
        }
    }

    /// Index of the first row of the page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Page size.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of rows the pages are cut from.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Zero-based index of the current page.
    pub fn page(&self) -> usize {
        if self.length == 0 {
            0
        } else {
            self.offset / self.length
        }
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        if self.length == 0 {
            0
        } else {
            self.total.div_ceil(self.length)
        }
    }

    /// Moves to page `page`. Out-of-range pages are ignored.
    ///
    /// Returns `true` if the offset changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= self.page_count() {
            return false;
        }
        self.set_offset(page * self.length)
    }

    /// Sets the offset as given. Returns `true` if it changed.
    pub fn set_offset(&mut self, offset: usize) -> bool {
        let changed = self.offset != offset;
        self.offset = offset;
        changed
    }

    /// Changes the page size and realigns the offset to the start of the page
    /// that contains it.
    pub fn set_length(&mut self, length: usize) -> bool {
        let before = (self.offset, self.length);
        self.length = length;
        if length > 0 {
            self.offset = (self.offset / length) * length;
        }
        before != (self.offset, self.length)
    }

    /// Sets the row count without touching the offset.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Pulls the offset back onto the last page after the total shrank.
    ///
    /// Returns `true` if the offset moved.
    pub fn clamp(&mut self) -> bool {
        if self.offset < self.total || self.offset == 0 {
            return false;
        }
        let last_page = self.page_count().saturating_sub(1);
        self.set_offset(last_page * self.length)
    }

    /// Returns to the first page.
    pub fn reset(&mut self) -> bool {
        self.set_offset(0)
    }

    /// Index range of the page within a collection of `len` rows.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = self.offset.min(len);
        let end = self.offset.saturating_add(self.length).min(len);
        start..end
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Request for the collaborator that fulfils lazy loading.
///
/// Carries everything a data source needs to produce one page: the window
/// and the active sort and filters.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyLoadRequest {
    /// Index of the first requested row.
    pub offset: usize,
    /// Number of requested rows.
    pub length: usize,
    /// Active sort.
    pub sort: SortSpec,
    /// Active filters.
    pub filters: FilterSet,
}

impl LazyLoadRequest {
    /// Index range of the requested rows.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}
