use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Fixed page size for every record listing.
pub const PAGE_SIZE: i64 = 5;

/// Query string accepted by the list endpoints: optional search text plus a
/// 1-indexed page number.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

/// A bounded slice of a filtered record set.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

pub fn total_pages(total: i64) -> i64 {
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Page 1 is always valid, even over an empty set; anything past the last
/// page is a distinct out-of-range condition rather than an empty page.
/// Shared by employee and candidate listings.
pub fn check_page_bounds(page: i64, total: i64) -> Result<(), ApiError> {
    if page < 1 {
        return Err(ApiError::PageOutOfRange {
            page,
            total_pages: total_pages(total),
        });
    }
    let pages = total_pages(total);
    if page > pages.max(1) {
        return Err(ApiError::PageOutOfRange {
            page,
            total_pages: pages,
        });
    }
    Ok(())
}

pub fn offset(page: i64) -> i64 {
    (page - 1) * PAGE_SIZE
}

/// Builds a `%...%` ILIKE pattern, escaping the wildcard characters so user
/// input matches literally.
pub fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn page_one_is_valid_over_empty_set() {
        assert!(check_page_bounds(1, 0).is_ok());
    }

    #[test]
    fn six_records_span_two_pages() {
        assert!(check_page_bounds(1, 6).is_ok());
        assert!(check_page_bounds(2, 6).is_ok());
        let err = check_page_bounds(3, 6).unwrap_err();
        match err {
            ApiError::PageOutOfRange { page, total_pages } => {
                assert_eq!(page, 3);
                assert_eq!(total_pages, 2);
            }
            other => panic!("expected PageOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn zero_and_negative_pages_are_out_of_range() {
        assert!(check_page_bounds(0, 10).is_err());
        assert!(check_page_bounds(-3, 10).is_err());
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(offset(1), 0);
        assert_eq!(offset(2), 5);
        assert_eq!(offset(4), 15);
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
