// Fixed-size pagination over an in-memory list.

use std::ops::Range;

/// Items per page. Not configurable.
pub const PAGE_SIZE: usize = 10;

/// Current page of a list, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self { current: 1 }
    }
}

impl Pager {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(len: usize) -> usize {
        len.div_ceil(PAGE_SIZE)
    }

    /// Move to `page` if it lies in `1..=total_pages`. Anything else is a
    /// no-op and returns `false`.
    pub fn set_page(&mut self, page: usize, len: usize) -> bool {
        if page == 0 || page > Self::total_pages(len) {
            return false;
        }
        self.current = page;
        true
    }

    /// Pull the current page back into range after the list changed size.
    pub fn clamp(&mut self, len: usize) {
        self.current = self.current.clamp(1, Self::total_pages(len).max(1));
    }

    /// Index range of the current page within a list of `len` items.
    pub fn range(&self, len: usize) -> Range<usize> {
        let start = ((self.current - 1) * PAGE_SIZE).min(len);
        let end = (start + PAGE_SIZE).min(len);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.range(items.len())).unwrap_or_default()
    }
}
