//! Dashboard session state and page bookkeeping.
//!
//! [`DashboardState`] holds what the product table is currently showing
//! (page, search text, category filter) and turns it into request
//! parameters. [`PageInfo`] answers the table footer's questions for one
//! fetched page: which page this is, how many there are, and where the
//! previous/next buttons lead.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::queries::products::ListProductsParams;

// ---------------------------------------------------------------------------
// DashboardState
// ---------------------------------------------------------------------------

/// Per-session view state of the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    page: usize,
    page_size: usize,
    search: Option<String>,
    category: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl DashboardState {
    /// Create a state on the first page. A page size of 0 is treated as 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            search: None,
            category: None,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Offset of the first row on the current page.
    pub fn skip(&self) -> usize {
        self.page * self.page_size
    }

    /// Change the search text and go back to the first page.
    ///
    /// An empty string clears the search.
    pub fn set_search(&mut self, query: &str) {
        self.search = non_empty(query);
        self.page = 0;
    }

    /// Change the category filter and go back to the first page.
    ///
    /// An empty string means "All Categories".
    pub fn set_category(&mut self, category: &str) {
        self.category = non_empty(category);
        self.page = 0;
    }

    /// Jump to the page containing row offset `skip`.
    pub fn go_to_skip(&mut self, skip: usize) {
        self.page = skip / self.page_size;
    }

    /// Parameters for the paginated table request.
    pub fn list_params(&self) -> ListProductsParams {
        ListProductsParams {
            limit: self.page_size,
            skip: self.skip(),
            search: self.search.clone(),
            category: self.category.clone(),
        }
    }

    /// `(search, category)` for the unpaginated insights request.
    pub fn insights_scope(&self) -> (Option<&str>, Option<&str>) {
        (self.search(), self.category())
    }

    /// Page bookkeeping for the current page given the server's total.
    pub fn page_info(&self, total: usize) -> PageInfo {
        PageInfo::new(total, self.skip(), self.page_size)
    }
}

// ---------------------------------------------------------------------------
// PageInfo
// ---------------------------------------------------------------------------

/// Position of one fetched page within the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total: usize,
    pub skip: usize,
    /// Rows per page; 0 means "everything on one page".
    pub limit: usize,
}

impl PageInfo {
    pub fn new(total: usize, skip: usize, limit: usize) -> Self {
        Self { total, skip, limit }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            return usize::from(self.total > 0);
        }
        self.total.div_ceil(self.limit)
    }

    /// 1-based page number.
    pub fn current_page(&self) -> usize {
        if self.limit == 0 {
            return 1;
        }
        self.skip / self.limit + 1
    }

    /// Offset of the previous page, or `None` on the first page.
    pub fn prev_skip(&self) -> Option<usize> {
        if self.skip == 0 {
            None
        } else {
            Some(self.skip.saturating_sub(self.limit))
        }
    }

    /// Offset of the next page, or `None` when this page reaches the end.
    pub fn next_skip(&self) -> Option<usize> {
        if self.limit == 0 {
            return None;
        }
        let next = self.skip + self.limit;
        (next < self.total).then_some(next)
    }

    /// 1-based `(first, last)` rows on this page; `(0, 0)` for no results.
    pub fn showing(&self) -> (usize, usize) {
        if self.total == 0 {
            return (0, 0);
        }
        let last = if self.limit == 0 {
            self.total
        } else {
            (self.skip + self.limit).min(self.total)
        };
        (self.skip + 1, last)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
