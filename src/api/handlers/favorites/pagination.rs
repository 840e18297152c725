//! Window math for the paginated favorites listing.

pub(crate) const DEFAULT_PAGE: i64 = 1;
pub(crate) const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct PageWindow {
    pub page: i64,
    pub offset: i64,
    pub len: i64,
    pub has_more: bool,
}

/// Compute the slice of a `total`-element list for the requested page.
///
/// Non-positive page or size fall back to the defaults. A page past the
/// end yields an empty window rather than an error.
pub(crate) fn page_window(total: i64, page: i64, page_size: i64) -> PageWindow {
    let page = if page <= 0 { DEFAULT_PAGE } else { page };
    let size = if page_size <= 0 { DEFAULT_PAGE_SIZE } else { page_size };

    let start = (page - 1).saturating_mul(size);
    if start >= total {
        return PageWindow {
            page,
            offset: start,
            len: 0,
            has_more: false,
        };
    }

    let end = start.saturating_add(size).min(total);

    PageWindow {
        page,
        offset: start,
        len: end - start,
        has_more: end < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let window = page_window(25, 2, 10);
        assert_eq!(window.offset, 10);
        assert_eq!(window.len, 10);
        assert!(window.has_more);
    }

    #[test]
    fn test_first_page_with_more() {
        let window = page_window(25, 1, 10);
        assert_eq!(window.offset, 0);
        assert_eq!(window.len, 10);
        assert!(window.has_more);
    }

    #[test]
    fn test_last_partial_page() {
        let window = page_window(25, 3, 10);
        assert_eq!(window.offset, 20);
        assert_eq!(window.len, 5);
        assert!(!window.has_more);
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let window = page_window(25, 10, 10);
        assert_eq!(window.len, 0);
        assert!(!window.has_more);
    }

    #[test]
    fn test_exact_boundary_has_no_more() {
        let window = page_window(20, 2, 10);
        assert_eq!(window.offset, 10);
        assert_eq!(window.len, 10);
        assert!(!window.has_more);
    }

    #[test]
    fn test_empty_list() {
        let window = page_window(0, 1, 10);
        assert_eq!(window.len, 0);
        assert!(!window.has_more);
    }

    #[test]
    fn test_non_positive_inputs_use_defaults() {
        let window = page_window(25, 0, 0);
        assert_eq!(window.page, DEFAULT_PAGE);
        assert_eq!(window.offset, 0);
        assert_eq!(window.len, DEFAULT_PAGE_SIZE);
        assert!(window.has_more);

        let window = page_window(25, -3, -1);
        assert_eq!(window.page, DEFAULT_PAGE);
        assert_eq!(window.len, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let window = page_window(25, i64::MAX, i64::MAX);
        assert_eq!(window.len, 0);
        assert!(!window.has_more);
    }
}
