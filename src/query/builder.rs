//! SQL rendering for the college listing.
//!
//! Renders the page-fetch and count statements from the same filter, so the
//! two can run concurrently against identical criteria.

use sea_query::{Asterisk, Expr, Order, PostgresQueryBuilder, Query};

use super::Colleges;
use super::filter::CollegeFilter;

/// Builds the paginated SELECT and the matching COUNT statement.
pub struct CollegeQueryBuilder {
    filter: CollegeFilter,
    sort: (Colleges, Order),
}

impl CollegeQueryBuilder {
    pub fn new(filter: CollegeFilter, sort: (Colleges, Order)) -> Self {
        Self { filter, sort }
    }

    /// Build the page-fetch SELECT with ORDER BY and LIMIT/OFFSET.
    pub fn build_page(&self, page: i64, limit: i64) -> String {
        let offset = page.max(1).saturating_sub(1).saturating_mul(limit);

        Query::select()
            .column(Asterisk)
            .from(Colleges::Table)
            .cond_where(self.filter.condition())
            .order_by((Colleges::Table, self.sort.0), self.sort.1.clone())
            .limit(limit as u64)
            .offset(offset as u64)
            .to_string(PostgresQueryBuilder)
    }

    /// Build the COUNT statement over the same filter.
    pub fn build_count(&self) -> String {
        Query::select()
            .expr(Expr::col(Asterisk).count())
            .from(Colleges::Table)
            .cond_where(self.filter.condition())
            .to_string(PostgresQueryBuilder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::LocationFilter;
    use crate::query::sort::SortOption;

    #[test]
    fn page_query_has_order_limit_offset() {
        let builder =
            CollegeQueryBuilder::new(CollegeFilter::default(), SortOption::NameAsc.resolve(false));
        let sql = builder.build_page(3, 12);

        assert!(sql.starts_with("SELECT * FROM \"college\""));
        assert!(sql.contains(r#""college"."is_active" = TRUE"#));
        assert!(sql.contains(r#"ORDER BY "college"."name" ASC"#));
        assert!(sql.contains("LIMIT 12"));
        assert!(sql.contains("OFFSET 24"));
    }

    #[test]
    fn first_page_has_zero_offset() {
        let builder =
            CollegeQueryBuilder::new(CollegeFilter::default(), SortOption::Newest.resolve(false));
        let sql = builder.build_page(1, 20);

        assert!(sql.contains(r#"ORDER BY "college"."created_at" DESC"#));
        assert!(sql.contains("OFFSET 0"));
    }

    #[test]
    fn huge_page_number_saturates_the_offset() {
        let builder =
            CollegeQueryBuilder::new(CollegeFilter::default(), SortOption::NameAsc.resolve(false));
        let sql = builder.build_page(i64::MAX, 12);

        assert!(sql.contains("OFFSET 9223372036854775807"));
    }

    #[test]
    fn count_query_shares_the_filter_and_skips_pagination() {
        let filter = CollegeFilter {
            category: Some("Engineering".to_string()),
            verified: Some(true),
            ..Default::default()
        };
        let builder = CollegeQueryBuilder::new(filter, SortOption::FeeDesc.resolve(false));
        let sql = builder.build_count();

        assert!(sql.starts_with("SELECT COUNT(*) FROM \"college\""));
        assert!(sql.contains(r#""college"."category" = 'Engineering'"#));
        assert!(sql.contains(r#""college"."is_verified" = TRUE"#));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn combined_filters_all_appear() {
        let filter = CollegeFilter {
            category: Some("MBA".to_string()),
            state: Some(LocationFilter::Id(
                "507f1f77bcf86cd799439011".parse().unwrap(),
            )),
            city: Some(LocationFilter::Name("pune".to_string())),
            course_name: Some("MBA".to_string()),
            verified: Some(false),
            search_tokens: vec!["management".to_string()],
        };
        let builder =
            CollegeQueryBuilder::new(filter, SortOption::RatingDesc.resolve(false));
        let sql = builder.build_page(1, 12);

        assert!(sql.contains(r#""college"."category" = 'MBA'"#));
        assert!(sql.contains(r#""college"."state_id" = '507f1f77bcf86cd799439011'"#));
        assert!(sql.contains(r#""college"."city_name" ILIKE '%pune%'"#));
        assert!(sql.contains(r#"'MBA' = ANY("college"."courses")"#));
        assert!(sql.contains(r#""college"."is_verified" = FALSE"#));
        assert!(sql.contains("ILIKE '%management%'"));
        assert!(sql.contains(r#"ORDER BY "college"."rating" DESC"#));
    }
}
