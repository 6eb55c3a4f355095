use super::types::{PageMeta, QueryLimit};

/// Translate a 1-based page number into limit/offset. Pages `<= 0` mean page 1.
///
/// Offsets saturate at `i64::MAX`, so an absurd page number reads as a page
/// past the end rather than overflowing.
pub fn build_page(page_number: i64, page_size: i64) -> QueryLimit {
    let page = if page_number <= 0 { 1 } else { page_number };
    QueryLimit {
        limit: page_size,
        offset: (page - 1).saturating_mul(page_size),
    }
}

/// `ceil(total / limit)`. Callers must not pass a zero limit.
pub fn compute_page_count(total: i64, limit: i64) -> i64 {
    debug_assert!(limit > 0, "page count requested with a zero limit");
    total / limit + i64::from(total % limit != 0)
}

impl PageMeta {
    pub fn new(request_total: usize, total: i64, limit: QueryLimit) -> Self {
        Self {
            request_total: request_total as i64,
            total,
            pages: compute_page_count(total, limit.limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_pages_start_at_zero() {
        assert_eq!(build_page(0, 20), QueryLimit { limit: 20, offset: 0 });
        assert_eq!(build_page(-7, 20), QueryLimit { limit: 20, offset: 0 });
        assert_eq!(build_page(1, 20), QueryLimit { limit: 20, offset: 0 });
    }

    #[test]
    fn later_pages_skip_previous_rows() {
        assert_eq!(build_page(2, 20).offset, 20);
        assert_eq!(build_page(5, 3).offset, 12);
    }

    #[test]
    fn huge_page_numbers_saturate() {
        assert_eq!(build_page(i64::MAX, 20), QueryLimit { limit: 20, offset: i64::MAX });
        assert_eq!(build_page(i64::MAX / 20 + 2, 20).offset, i64::MAX);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(compute_page_count(0, 20), 0);
        assert_eq!(compute_page_count(20, 20), 1);
        assert_eq!(compute_page_count(21, 20), 2);
        assert_eq!(compute_page_count(25, 20), 2);
        assert_eq!(compute_page_count(i64::MAX, i64::MAX), 1);
    }

    #[test]
    fn meta_for_second_page() {
        let limit = build_page(2, 20);
        let meta = PageMeta::new(5, 25, limit);
        assert_eq!(meta, PageMeta { request_total: 5, total: 25, pages: 2 });
    }
}
