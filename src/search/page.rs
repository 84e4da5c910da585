//! Pagination State
//!
//! One-based page counter plus page size and the total reported by the backend.

/// Page sizes offered by the UI
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Default page size for object grids
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// Current page, starting at 1
    pub current: usize,
    pub page_size: usize,
    pub total: u64,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// Zero-based offset of the first row on the current page
    pub fn offset(&self) -> usize {
        self.current.saturating_sub(1) * self.page_size
    }

    pub fn total_pages(&self) -> usize {
        (self.total as usize).div_ceil(self.page_size)
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Jump to a page. Returns true if the page actually changed.
    ///
    /// Pages past the end are refused once a total is known.
    pub fn set_page(&mut self, page: usize) -> bool {
        let page = page.max(1);
        let last = self.total_pages().max(1);
        if page > last || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.current + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.set_page(self.current - 1)
    }

    /// Change the page size and go back to page 1
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.current = 1;
    }

    /// Step to the next entry of [`PAGE_SIZE_OPTIONS`], wrapping around
    pub fn cycle_page_size(&mut self) {
        let next = PAGE_SIZE_OPTIONS
            .iter()
            .copied()
            .find(|&s| s > self.page_size)
            .unwrap_or(PAGE_SIZE_OPTIONS[0]);
        self.set_page_size(next);
    }

    /// One-based inclusive range of rows shown, `(0, 0)` when empty
    pub fn range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let start = self.offset() as u64 + 1;
        let end = (self.offset() + self.page_size) as u64;
        (start.min(self.total), end.min(self.total))
    }

    /// Slice a locally held list down to the current page
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
