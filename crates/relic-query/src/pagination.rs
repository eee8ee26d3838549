//! Page windowing over ordered results.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number, starting at 1.
    pub page: usize,
    /// Items per page.
    #[serde(rename = "pageSize")]
    pub page_size: usize,
}

impl Pagination {
    /// Creates a page request.
    pub fn new(page: usize, page_size: usize) -> Self {
        Pagination { page, page_size }
    }

    /// Returns this page of `items`.
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.page_size)
    }
}

/// Returns the items on `page` (1-indexed) when split into pages of
/// `page_size`.
///
/// The window is `(page - 1) * page_size .. page * page_size`, clamped to the
/// slice. Page `0`, a page past the end and a zero page size all yield an
/// empty slice. No page-number correction is performed; see [`safe_page`].
///
/// ```
/// use relic_query::paginate;
///
/// let items: Vec<u32> = (1..=25).collect();
/// assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
/// assert!(paginate(&items, 4, 10).is_empty());
/// ```
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let window = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(items.len());
            let end = page.saturating_mul(page_size).min(items.len());
            &items[start..end]
        }
        None => &items[..0],
    };
    debug!(
        total = items.len(),
        page,
        page_size,
        returned = window.len(),
        "paginated items"
    );
    window
}

/// Number of pages needed for `total` items; `0` when there is nothing to
/// show or the page size is zero.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Clamps a requested page into `1..=page_count`, or `1` when there are no
/// pages.
///
/// ```
/// use relic_query::safe_page;
///
/// assert_eq!(safe_page(9, 25, 10), 3);
/// assert_eq!(safe_page(0, 25, 10), 1);
/// assert_eq!(safe_page(2, 0, 10), 1);
/// ```
pub fn safe_page(page: usize, total: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total, page_size).max(1))
}
