//! Pagination utilities for card display

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Index of the first card on this page
    pub offset: usize,
    /// Cards per page
    pub page_size: usize,
}

impl Pagination {
    /// The visible page of an ordered result
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = (self.offset + self.page_size).min(items.len());
        &items[start..end]
    }
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]. A page size of
/// zero is treated as one.
///
/// # Examples
/// ```
/// use agentmap_browse::pagination::calculate_pagination;
///
/// // 25 results at 12 per page = 3 pages (12 + 12 + 1)
/// let p = calculate_pagination(25, 2, 12);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(25, 99, 12);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize, page_size: usize) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = total_results.div_ceil(page_size);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        offset,
        page_size,
    }
}
