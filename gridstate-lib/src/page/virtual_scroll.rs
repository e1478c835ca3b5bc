//! Virtual-scroll page cache

use std::collections::BTreeSet;
use std::ops::Range;

/// Remembers which pages a virtual-scrolling table already requested.
///
/// Scrolling keeps a sliding window of three pages (previous, current and
/// next) around the row in view. Only pages of that window that were not
/// requested yet are loaded, as one contiguous span, and pages that leave
/// the window are forgotten.
#[derive(Debug, Clone)]
pub struct VirtualScrollLoader {
    page_size: usize,
    loaded: BTreeSet<usize>,
}

impl VirtualScrollLoader {
    /// Creates an empty cache for pages of `page_size` rows.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            loaded: BTreeSet::new(),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Page that contains row `index`.
    pub fn page_of(&self, index: usize) -> usize {
        index / self.page_size
    }

    /// Returns `true` if `page` is in the window and was requested.
    pub fn is_loaded(&self, page: usize) -> bool {
        self.loaded.contains(&page)
    }

    /// Moves the window to row `index`.
    ///
    /// Returns the row range to load, or `None` when the whole window is
    /// already loaded. `total` caps the window at the last page when the row
    /// count is known.
    pub fn scroll_to(&mut self, index: usize, total: Option<usize>) -> Option<Range<usize>> {
        let page = self.page_of(index);
        let mut first = page.saturating_sub(1);
        let mut last = page + 1;
        if let Some(total) = total {
            let last_page = total.div_ceil(self.page_size).saturating_sub(1);
            last = last.min(last_page);
            first = first.min(last);
        }

        self.loaded.retain(|p| (first..=last).contains(p));

        let missing: Vec<usize> = (first..=last).filter(|p| !self.loaded.contains(p)).collect();
        let (start, end) = (*missing.first()?, *missing.last()?);
        self.loaded.extend(start..=end);

        log::debug!("[page] virtual scroll to row {}: loading pages {}..={}", index, start, end);
        Some(start * self.page_size..(end + 1) * self.page_size)
    }

    /// Forgets every page.
    pub fn reset(&mut self) {
        self.loaded.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_only_missing_pages() {
        let mut loader = VirtualScrollLoader::new(10);
        assert_eq!(loader.scroll_to(0, None), Some(0..20));
        assert_eq!(loader.scroll_to(5, None), None);
        // Page 2 joins the window; pages 0 and 1 are already there.
        assert_eq!(loader.scroll_to(15, None), Some(20..30));
    }

    #[test]
    fn test_window_slides() {
        let mut loader = VirtualScrollLoader::new(10);
        loader.scroll_to(0, None);
        loader.scroll_to(45, None);
        assert!(!loader.is_loaded(0));
        assert!(loader.is_loaded(3) && loader.is_loaded(4) && loader.is_loaded(5));

        // Scrolling back re-requests the forgotten page.
        assert_eq!(loader.scroll_to(25, None), Some(10..30));
    }

    #[test]
    fn test_total_caps_window() {
        let mut loader = VirtualScrollLoader::new(10);
        assert_eq!(loader.scroll_to(25, Some(30)), Some(10..30));
        loader.reset();
        assert_eq!(loader.scroll_to(0, Some(0)), Some(0..10));
    }
}
