//! HTTP route modules. Each exposes a `router()` merged in `main`.

pub mod admin_catalog;
pub mod admin_colleges;
pub mod admin_enquiries;
pub mod colleges;
pub mod enquiries;
pub mod health;
pub mod locations;
pub mod streams;

use serde::Serialize;

/// Pagination metadata included in every paginated response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn middle_page_has_both_neighbours() {
        let p = Pagination::new(2, 12, 30);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_prev);
    }

    #[test]
    fn first_and_last_pages() {
        let first = Pagination::new(1, 10, 25);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = Pagination::new(3, 10, 25);
        assert!(last.has_prev);
        assert!(!last.has_next);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Pagination::new(1, 12, 13).total_pages, 2);
        assert_eq!(Pagination::new(1, 12, 24).total_pages, 2);
        assert_eq!(Pagination::new(1, 12, 25).total_pages, 3);
    }

    #[test]
    fn empty_result_set() {
        let p = Pagination::new(1, 12, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_prev);
    }
}
