//! Pagination controller
//!
//! Tracks the page cursor of the paginated listings. Whether another page
//! exists is inferred from the last fetch returning a full page; the
//! upstream listing endpoints return no total count, so this stays a
//! heuristic and is knowingly wrong when the total is an exact multiple of
//! the page size.

use crate::error::AdminError;

// == Page Sizes ==
/// Page sizes the listing screens offer.
pub const PAGE_SIZES: [u32; 3] = [10, 25, 50];

// == Pager ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    page_size: u32,
    has_more: bool,
}

impl Pager {
    /// Creates a pager on page 1. Until a page is recorded, `has_more` is
    /// false and `next` does nothing.
    pub fn new(page_size: u32) -> Result<Self, AdminError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(AdminError::Validation(format!(
                "page size must be one of {:?}",
                PAGE_SIZES
            )));
        }
        Ok(Self {
            page: 1,
            page_size,
            has_more: false,
        })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Offset/limit form of the cursor for the marketplace API.
    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    /// True when the last recorded page was full, which is taken to mean a
    /// successor exists.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    // == Transitions ==
    /// Feeds back how many rows the fetch for the current page returned.
    pub fn record_page(&mut self, result_count: usize) {
        self.has_more = result_count == self.page_size as usize;
    }

    /// Advances one page; no-op when no further page is assumed to exist.
    pub fn next(&mut self) {
        if self.has_more {
            self.page += 1;
            // Nothing is known about the new page until its fetch reports.
            self.has_more = false;
        }
    }

    /// Goes back one page, flooring at page 1.
    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Switches page size and restarts from page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), AdminError> {
        if !PAGE_SIZES.contains(&page_size) {
            return Err(AdminError::Validation(format!(
                "page size must be one of {:?}",
                PAGE_SIZES
            )));
        }
        self.page_size = page_size;
        self.reset();
        Ok(())
    }

    /// Returns to page 1. Called whenever a filter changes.
    pub fn reset(&mut self) {
        self.page = 1;
        self.has_more = false;
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 25,
            has_more: false,
        }
    }
}
