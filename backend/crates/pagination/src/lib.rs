//! Page-number pagination primitives shared by listing endpoints.
//!
//! A [`PageRequest`] carries a 1-indexed page number and a page size that
//! have already been clamped into range, so adapters can compute offsets
//! without re-validating. A [`Page`] pairs one slice of results with the total
//! match count and derives the page count from it.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(8));
//! let page = Page::new(vec!["a", "b"], 17, request);
//! assert_eq!(page.total_pages(), 3);
//! assert_eq!(page.current_page(), 2);
//! ```

/// Page size used when the caller omits `limit` or sends a non-positive one.
pub const DEFAULT_LIMIT: u32 = 8;

/// Upper bound for a single page.
pub const MAX_LIMIT: u32 = 100;

/// Normalised page request.
///
/// ## Invariants
/// - `page >= 1`.
/// - `1 <= limit <= MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from loosely typed query values.
    ///
    /// Missing or non-positive pages fall back to the first page. Missing or
    /// non-positive limits fall back to [`DEFAULT_LIMIT`]; oversized limits are
    /// clamped to [`MAX_LIMIT`].
    ///
    /// ```
    /// use pagination::{DEFAULT_LIMIT, MAX_LIMIT, PageRequest};
    ///
    /// assert_eq!(PageRequest::new(None, None).limit(), DEFAULT_LIMIT);
    /// assert_eq!(PageRequest::new(Some(-3), Some(0)).page(), 1);
    /// assert_eq!(PageRequest::new(Some(1), Some(5_000)).limit(), MAX_LIMIT);
    /// ```
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .filter(|value| *value >= 1)
            .map_or(1, |value| u32::try_from(value).unwrap_or(u32::MAX));
        let limit = limit
            .filter(|value| *value >= 1)
            .map_or(DEFAULT_LIMIT, |value| {
                u32::try_from(value).unwrap_or(MAX_LIMIT).min(MAX_LIMIT)
            });
        Self { page, limit }
    }

    /// 1-indexed page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1).saturating_mul(self.limit as u64)
    }
}

/// Number of pages needed to show `total` items `limit` at a time.
///
/// Zero items produce zero pages.
#[must_use]
pub const fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit as u64)
}

/// One page of results plus the figures needed to render pagination controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Wrap a slice of results.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Total number of matches across all pages.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// `ceil(total / limit)`.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        total_pages(self.total, self.request.limit())
    }

    /// Page number the items were taken from.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.request.page()
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for request normalisation and page arithmetic.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(None, None, 1, DEFAULT_LIMIT)]
    #[case(Some(0), Some(0), 1, DEFAULT_LIMIT)]
    #[case(Some(-4), Some(-1), 1, DEFAULT_LIMIT)]
    #[case(Some(3), Some(20), 3, 20)]
    #[case(Some(2), Some(1_000), 2, MAX_LIMIT)]
    fn new_normalises_loose_values(
        #[case] page: Option<i64>,
        #[case] limit: Option<i64>,
        #[case] expected_page: u32,
        #[case] expected_limit: u32,
    ) {
        let request = PageRequest::new(page, limit);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(0, 8, 0)]
    #[case(1, 8, 1)]
    #[case(8, 8, 1)]
    #[case(9, 8, 2)]
    #[case(17, 8, 3)]
    #[case(17, 0, 0)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] limit: u32, #[case] expected: u64) {
        assert_eq!(total_pages(total, limit), expected);
    }

    #[rstest]
    fn offset_skips_previous_pages() {
        let request = PageRequest::new(Some(3), Some(8));
        assert_eq!(request.offset(), 16);
    }

    #[rstest]
    fn page_reports_figures_for_its_request() {
        let page = Page::new(vec![1, 2, 3], 17, PageRequest::new(Some(3), Some(8)));
        assert_eq!(page.items(), &[1, 2, 3]);
        assert_eq!(page.total(), 17);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.current_page(), 3);
        assert_eq!(page.into_items(), vec![1, 2, 3]);
    }
}
