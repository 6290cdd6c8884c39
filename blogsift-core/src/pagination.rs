//! Page windows over the filtered item list.
//!
//! [`plan`] turns a filtered-set size, a page size and the current page into a
//! [`PagePlan`]: the slice of items to show, the page numbers to offer, and
//! the state of the prev/next and "load more" controls.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Maximum number of page links shown at once
pub const PAGE_WINDOW: usize = 5;

/// How successive pages are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PagingMode {
    /// Numbered pages; each page replaces the previous one
    #[default]
    Pagination,
    /// A "more" control appends the next page to what is already shown
    LoadMore,
}

/// Which navigation controls the caller renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavOptions {
    pub prev: bool,
    pub next: bool,
}

/// A prev/next control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControl {
    pub disabled: bool,
}

/// Everything needed to render one page of results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan {
    /// Size of the filtered set
    pub total_items: usize,
    pub current_page: usize,
    pub total_pages: usize,
    /// Positions (into the filtered list) of the current page's items
    pub visible: Range<usize>,
    /// Page numbers to offer, ascending
    pub window: Vec<usize>,
    pub prev: Option<NavControl>,
    pub next: Option<NavControl>,
    /// Whether a "load more" control should be shown
    pub has_more: bool,
}

impl PagePlan {
    pub fn prev_disabled(&self) -> bool {
        self.current_page == 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current_page == self.total_pages
    }

    /// Positions of everything shown so far in load-more mode
    pub fn cumulative(&self) -> Range<usize> {
        0..self.visible.end
    }
}

/// Number of pages needed for `total` items
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Item positions shown on `current_page`; empty past the last page
pub fn visible_range(total: usize, page_size: usize, current_page: usize) -> Range<usize> {
    let first = current_page.saturating_sub(1).saturating_mul(page_size);
    let last = current_page.saturating_mul(page_size);
    first.min(total)..last.min(total)
}

/// Page numbers to offer around `current_page`
///
/// Up to [`PAGE_WINDOW`] pages starting two before the current page, pulled
/// back so the window never starts before page 1 or runs past the last page.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    let span = PAGE_WINDOW as isize - 1;
    let pages = total_pages as isize;

    let mut left = (current_page as isize - 2).max(1);
    let right = (left + span).min(pages);
    if pages - span > 0 && left > pages - span {
        left = pages - span;
    }

    (left..=right).map(|page| page as usize).collect()
}

/// Plan the page for a filtered set of `total` items
///
/// `current_page` is never clamped: a page past the end yields an empty
/// visible range. Navigation controls are only produced when configured and
/// there is something to page through.
pub fn plan(total: usize, page_size: usize, current_page: usize, nav: NavOptions) -> PagePlan {
    let current_page = current_page.max(1);
    let total_pages = total_pages(total, page_size);
    let window = if total > 0 {
        page_window(current_page, total_pages)
    } else {
        Vec::new()
    };

    let control = |enabled: bool, disabled: bool| {
        (enabled && total > 0).then_some(NavControl { disabled })
    };

    PagePlan {
        total_items: total,
        current_page,
        total_pages,
        visible: visible_range(total, page_size, current_page),
        window,
        prev: control(nav.prev, current_page == 1),
        next: control(nav.next, current_page == total_pages),
        has_more: total > current_page.saturating_mul(page_size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOTH: NavOptions = NavOptions {
        prev: true,
        next: true,
    };

    #[test]
    fn test_last_partial_page() {
        let p = plan(23, 10, 3, BOTH);
        assert_eq!(p.visible, 20..23);
        assert_eq!(p.total_items, 23);
        assert_eq!(p.total_pages, 3);
        assert!(p.next_disabled());
        assert!(!p.prev_disabled());
        assert_eq!(p.next, Some(NavControl { disabled: true }));
        assert_eq!(p.prev, Some(NavControl { disabled: false }));
        assert!(!p.has_more);
    }

    #[test]
    fn test_page_window_positions() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_window(2, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(9, 10), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_page_window_with_few_pages() {
        assert_eq!(page_window(1, 3), vec![1, 2, 3]);
        assert_eq!(page_window(3, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(5, 5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let p = plan(23, 10, 7, BOTH);
        assert!(p.visible.is_empty());
        assert_eq!(p.current_page, 7);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_more);
    }

    #[test]
    fn test_empty_result_set() {
        let p = plan(0, 10, 1, BOTH);
        assert_eq!(p.total_pages, 0);
        assert!(p.visible.is_empty());
        assert!(p.window.is_empty());
        assert_eq!(p.prev, None);
        assert_eq!(p.next, None);
    }

    #[test]
    fn test_controls_only_when_configured() {
        let p = plan(30, 10, 2, NavOptions::default());
        assert_eq!(p.prev, None);
        assert_eq!(p.next, None);

        let p = plan(30, 10, 2, NavOptions { prev: true, next: false });
        assert_eq!(p.prev, Some(NavControl { disabled: false }));
        assert_eq!(p.next, None);
    }

    #[test]
    fn test_load_more_visibility() {
        assert!(plan(25, 10, 1, NavOptions::default()).has_more);
        assert!(plan(25, 10, 2, NavOptions::default()).has_more);
        assert!(!plan(25, 10, 3, NavOptions::default()).has_more);
        assert!(!plan(20, 10, 2, NavOptions::default()).has_more);
    }

    #[test]
    fn test_cumulative_range() {
        let p = plan(25, 10, 2, NavOptions::default());
        assert_eq!(p.visible, 10..20);
        assert_eq!(p.cumulative(), 0..20);
    }

    #[test]
    fn test_single_page_when_page_size_covers_all() {
        let p = plan(7, 7, 1, BOTH);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.visible, 0..7);
        assert_eq!(p.window, vec![1]);
        assert!(p.prev_disabled() && p.next_disabled());
    }
}
