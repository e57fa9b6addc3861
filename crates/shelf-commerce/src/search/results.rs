//! Client-side pagination over a fetched result set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Products per page in the storefront grid.
pub const DEFAULT_PAGE_SIZE: usize = 18;

/// Pages shown in full before the selector starts eliding.
const MAX_FULL_BUTTONS: usize = 5;

/// One entry in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageButton {
    Page(usize),
    /// Non-interactive gap marker.
    Ellipsis,
}

impl PageButton {
    /// Target page, or `None` for an ellipsis.
    pub fn page(&self) -> Option<usize> {
        match self {
            PageButton::Page(n) => Some(*n),
            PageButton::Ellipsis => None,
        }
    }
}

impl fmt::Display for PageButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageButton::Page(n) => write!(f, "{}", n),
            PageButton::Ellipsis => f.write_str("…"),
        }
    }
}

/// Number of pages needed for `count` items; zero items means zero pages.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Contiguous window `[(page-1)*size, page*size)`, clamped to the items.
pub fn slice<T>(items: &[T], page_size: usize, current_page: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = current_page
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page selector entries for the given position.
pub fn buttons(total_pages: usize, current_page: usize) -> Vec<PageButton> {
    use PageButton::{Ellipsis, Page};

    if total_pages <= MAX_FULL_BUTTONS {
        return (1..=total_pages).map(Page).collect();
    }

    if current_page <= 3 {
        vec![Page(1), Page(2), Page(3), Ellipsis, Page(total_pages)]
    } else if current_page >= total_pages - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ]
    } else {
        vec![Page(1), Ellipsis, Page(current_page), Ellipsis, Page(total_pages)]
    }
}

/// Pagination state: the current page over a result count.
///
/// The current page is always kept within `[1, max(total_pages, 1)]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    per_page: usize,
    total: usize,
}

impl Pagination {
    /// Create pagination info, clamping `page`.
    pub fn new(page: usize, per_page: usize, total: usize) -> Self {
        let mut p = Self {
            page,
            per_page: per_page.max(1),
            total,
        };
        p.clamp();
        p
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.per_page)
    }

    /// Back to page 1 over a new result count (a query change).
    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.page = 1;
    }

    /// Jump to a page, clamped to the valid range.
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
        self.clamp();
    }

    /// Next page; stays put on the last page.
    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    /// Previous page; stays put on the first page.
    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> usize {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        (self.page * self.per_page).min(self.total)
    }

    /// The current page's items.
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        slice(items, self.per_page, self.page)
    }

    /// Page selector for the current position.
    pub fn buttons(&self) -> Vec<PageButton> {
        buttons(self.total_pages(), self.page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, 0)
    }
}
