//! Filter composition for the college listing.
//!
//! Produces one WHERE condition for "active colleges matching all supplied
//! criteria". Location filters carry an id/name precedence: a valid id wins
//! over free-text name matching at the same level. The free-text search is
//! ANDed in as its own top-level clause, never merged field-by-field with
//! the structural filters.

use sea_query::extension::postgres::PgExpr;
use sea_query::{Cond, Expr, SimpleExpr};

use super::Colleges;
use crate::models::ObjectId;

/// One level of the location filter, id-based or name-based. Id-based
/// filtering is exact; name-based is a case-insensitive substring match
/// against the denormalized display name.
#[derive(Debug, Clone)]
pub enum LocationFilter {
    Id(ObjectId),
    Name(String),
}

impl LocationFilter {
    fn clause(&self, id_col: Colleges, name_col: Colleges) -> SimpleExpr {
        match self {
            Self::Id(id) => Expr::col((Colleges::Table, id_col)).eq(id.as_str()),
            Self::Name(name) => Expr::col((Colleges::Table, name_col))
                .ilike(format!("%{}%", escape_like_wildcards(name))),
        }
    }
}

/// Structured filter over the college table.
#[derive(Debug, Clone, Default)]
pub struct CollegeFilter {
    /// Validated member of the category set; unknown values are dropped upstream.
    pub category: Option<String>,
    pub state: Option<LocationFilter>,
    pub city: Option<LocationFilter>,
    /// Resolved course name; matching is exact membership in the
    /// denormalized course-name array.
    pub course_name: Option<String>,
    pub verified: Option<bool>,
    /// Whitespace-split search tokens. Every token must match at least one
    /// searchable field, tokens may match different fields.
    pub search_tokens: Vec<String>,
}

impl CollegeFilter {
    /// Compose the full WHERE condition. Always restricts to active colleges.
    pub fn condition(&self) -> Cond {
        let mut cond =
            Cond::all().add(Expr::col((Colleges::Table, Colleges::IsActive)).eq(true));

        if let Some(ref category) = self.category {
            cond = cond.add(Expr::col((Colleges::Table, Colleges::Category)).eq(category));
        }

        if let Some(ref state) = self.state {
            cond = cond.add(state.clause(Colleges::StateId, Colleges::StateName));
        }

        if let Some(ref city) = self.city {
            cond = cond.add(city.clause(Colleges::CityId, Colleges::CityName));
        }

        if let Some(ref course_name) = self.course_name {
            cond = cond.add(Expr::cust_with_values(
                r#"$1 = ANY("college"."courses")"#,
                [course_name.clone()],
            ));
        }

        if let Some(verified) = self.verified {
            cond = cond.add(Expr::col((Colleges::Table, Colleges::IsVerified)).eq(verified));
        }

        for token in &self.search_tokens {
            cond = cond.add(token_condition(token));
        }

        cond
    }
}

/// Build the per-token OR clause across the searchable fields. The course
/// array is flattened to a single string so substring matching behaves the
/// same as for the scalar columns.
fn token_condition(token: &str) -> Cond {
    let pattern = format!("%{}%", escape_like_wildcards(token));

    let text_columns = [
        Colleges::Name,
        Colleges::LocationDisplay,
        Colleges::StateName,
        Colleges::CityName,
        Colleges::Description,
        Colleges::ShortName,
        Colleges::Badge,
    ];

    let mut any = Cond::any();
    for col in text_columns {
        any = any.add(Expr::col((Colleges::Table, col)).ilike(pattern.clone()));
    }
    any.add(Expr::cust_with_values(
        r#"array_to_string("college"."courses", ' ') ILIKE $1"#,
        [pattern],
    ))
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like_wildcards(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use sea_query::{PostgresQueryBuilder, Query};

    use super::*;

    fn render(filter: &CollegeFilter) -> String {
        Query::select()
            .expr(Expr::cust("1"))
            .from(Colleges::Table)
            .cond_where(filter.condition())
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn base_condition_restricts_to_active() {
        let sql = render(&CollegeFilter::default());
        assert!(sql.contains(r#""college"."is_active" = TRUE"#));
    }

    #[test]
    fn state_id_filters_by_id_column() {
        let filter = CollegeFilter {
            state: Some(LocationFilter::Id(
                "507f1f77bcf86cd799439011".parse().unwrap(),
            )),
            ..Default::default()
        };
        let sql = render(&filter);
        assert!(sql.contains(r#""college"."state_id" = '507f1f77bcf86cd799439011'"#));
        assert!(!sql.contains("state_name"));
    }

    #[test]
    fn state_name_filters_by_substring() {
        let filter = CollegeFilter {
            state: Some(LocationFilter::Name("maha".to_string())),
            ..Default::default()
        };
        let sql = render(&filter);
        assert!(sql.contains(r#""college"."state_name" ILIKE '%maha%'"#));
    }

    #[test]
    fn course_name_uses_exact_array_membership() {
        let filter = CollegeFilter {
            course_name: Some("MBA".to_string()),
            ..Default::default()
        };
        let sql = render(&filter);
        assert!(sql.contains(r#"'MBA' = ANY("college"."courses")"#));
    }

    #[test]
    fn search_tokens_are_anded_and_span_all_fields() {
        let filter = CollegeFilter {
            search_tokens: vec!["Delhi".to_string(), "Engineering".to_string()],
            ..Default::default()
        };
        let sql = render(&filter);
        // Each token gets its own OR group over every searchable field.
        assert_eq!(sql.matches("ILIKE '%Delhi%'").count(), 8);
        assert_eq!(sql.matches("ILIKE '%Engineering%'").count(), 8);
        assert!(sql.contains(r#""college"."name" ILIKE '%Delhi%'"#));
        assert!(sql.contains(r#""college"."badge" ILIKE '%Delhi%'"#));
        assert!(sql.contains(r#"array_to_string("college"."courses", ' ') ILIKE '%Delhi%'"#));
    }

    #[test]
    fn like_wildcards_in_search_are_escaped() {
        let filter = CollegeFilter {
            search_tokens: vec!["100%".to_string()],
            ..Default::default()
        };
        let sql = render(&filter);
        // The literal percent sign must not survive as a bare wildcard.
        assert!(!sql.contains("'%100%'"));
        assert!(sql.contains("100"));
    }

    #[test]
    fn escape_like_wildcards_function() {
        assert_eq!(escape_like_wildcards("hello"), "hello");
        assert_eq!(escape_like_wildcards("100%"), "100\\%");
        assert_eq!(escape_like_wildcards("a_b"), "a\\_b");
        assert_eq!(escape_like_wildcards("a\\b"), "a\\\\b");
    }
}
