//! Public college listing and detail endpoints.
//!
//! The listing pipeline: strict id-shape validation gate, then lenient
//! normalization of everything else, filter and sort composition, and a
//! concurrent count + page fetch over the same rendered filter.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::error::{AppError, AppResult, FieldError};
use crate::models::college::{category_for_stream_slug, is_college_category};
use crate::models::{College, Course, ObjectId};
use crate::query::filter::{CollegeFilter, LocationFilter};
use crate::query::normalize::{
    RawListingQuery, parse_limit, parse_page, parse_search, parse_verified,
};
use crate::query::project::{CollegeDetail, CollegeListItem};
use crate::query::sort::SortOption;
use crate::query::CollegeQueryBuilder;
use crate::routes::Pagination;
use crate::state::AppState;

fn supplied(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// Strict format gate for the three id-shaped listing parameters. Any
/// malformed id aborts the request before a query is issued, one error
/// entry per offending field. An empty parameter counts as absent, but a
/// whitespace-only one is present and fails the format check.
fn validate_id_params(raw: &RawListingQuery) -> Result<(), AppError> {
    let checks = [
        ("stateId", raw.state_id.as_deref()),
        ("cityId", raw.city_id.as_deref()),
        ("courseId", raw.course_id.as_deref()),
    ];

    let errors: Vec<FieldError> = checks
        .into_iter()
        .filter_map(|(field, value)| {
            let value = value.filter(|v| !v.is_empty())?;
            if ObjectId::is_valid(value) {
                None
            } else {
                Some(FieldError::new(
                    field,
                    format!("Invalid {field} format (24-char hex)"),
                ))
            }
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

fn location_filter(id: Option<&str>, name: Option<&str>) -> Option<LocationFilter> {
    if let Some(id) = supplied(id) {
        // The gate above guarantees the shape here.
        if let Ok(id) = id.parse() {
            return Some(LocationFilter::Id(id));
        }
    }
    supplied(name).map(|n| LocationFilter::Name(n.to_string()))
}

/// Resolve the category clause: an exact member of the category set wins,
/// the sentinel "All" and unknown values are ignored, and a stream slug is
/// the fallback when no category was given.
fn resolve_category(category: Option<&str>, stream: Option<&str>) -> Option<String> {
    if let Some(cat) = supplied(category).filter(|c| *c != "All") {
        return is_college_category(cat).then(|| cat.to_string());
    }
    supplied(stream)
        .and_then(category_for_stream_slug)
        .map(str::to_string)
}

async fn list_colleges(
    State(state): State<AppState>,
    Query(raw): Query<RawListingQuery>,
) -> AppResult<Json<Value>> {
    validate_id_params(&raw)?;

    let page = parse_page(raw.page.as_deref());
    let limit = parse_limit(raw.limit.as_deref());
    let search = parse_search(raw.search.as_deref());
    let sort = SortOption::parse(raw.sort.as_deref());

    // Sequential dependency: the course id must resolve to a name before
    // the filter can be finalized. An unknown id simply adds no clause.
    let course_name = match supplied(raw.course_id.as_deref()) {
        Some(id) => {
            let id: ObjectId = id.parse().map_err(anyhow::Error::from)?;
            Course::find_by_id(state.db(), &id).await?.map(|c| c.name)
        }
        None => None,
    };

    let filter = CollegeFilter {
        category: resolve_category(raw.category.as_deref(), raw.stream.as_deref()),
        state: location_filter(raw.state_id.as_deref(), raw.state.as_deref()),
        city: location_filter(raw.city_id.as_deref(), raw.city.as_deref()),
        course_name,
        verified: parse_verified(raw.verified.as_deref()),
        search_tokens: search
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
    };

    let builder = CollegeQueryBuilder::new(filter, sort.resolve(search.is_some()));
    let count_sql = builder.build_count();
    let page_sql = builder.build_page(page, limit);

    let db = state.db();
    let (total, rows): (i64, Vec<College>) = tokio::try_join!(
        async { sqlx::query_scalar(&count_sql).fetch_one(db).await },
        async { sqlx::query_as(&page_sql).fetch_all(db).await },
    )?;

    let colleges: Vec<CollegeListItem> = rows.into_iter().map(CollegeListItem::from).collect();

    Ok(Json(json!({
        "success": true,
        "data": {
            "colleges": colleges,
            "pagination": Pagination::new(page, limit, total),
        },
    })))
}

async fn get_college_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Value>> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(AppError::college_not_found());
    }

    let college = College::find_by_slug_active(state.db(), slug)
        .await?
        .ok_or_else(AppError::college_not_found)?;

    Ok(Json(json!({
        "success": true,
        "data": CollegeDetail::from(college),
    })))
}

/// Create the public college router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/colleges", get(list_colleges))
        .route("/api/colleges/{slug}", get(get_college_by_slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with(field: &str, value: &str) -> RawListingQuery {
        let mut raw = RawListingQuery::default();
        match field {
            "stateId" => raw.state_id = Some(value.to_string()),
            "cityId" => raw.city_id = Some(value.to_string()),
            "courseId" => raw.course_id = Some(value.to_string()),
            _ => unreachable!(),
        }
        raw
    }

    #[test]
    fn malformed_ids_collect_one_error_per_field() {
        let raw = RawListingQuery {
            state_id: Some("nope".to_string()),
            city_id: Some("also-bad".to_string()),
            course_id: Some("507f1f77bcf86cd799439011".to_string()),
            ..Default::default()
        };
        let err = validate_id_params(&raw).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "stateId");
                assert_eq!(errors[0].message, "Invalid stateId format (24-char hex)");
                assert_eq!(errors[1].field, "cityId");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn absent_and_empty_ids_pass_the_gate() {
        assert!(validate_id_params(&RawListingQuery::default()).is_ok());
        assert!(validate_id_params(&raw_with("stateId", "")).is_ok());
        assert!(validate_id_params(&raw_with("courseId", "507f1f77bcf86cd799439011")).is_ok());
    }

    #[test]
    fn whitespace_only_id_fails_the_gate() {
        let err = validate_id_params(&raw_with("stateId", "  ")).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "stateId");
                assert_eq!(errors[0].message, "Invalid stateId format (24-char hex)");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn id_wins_over_name_for_location() {
        let filter = location_filter(Some("507f1f77bcf86cd799439011"), Some("Maharashtra"));
        assert!(matches!(filter, Some(LocationFilter::Id(_))));

        let filter = location_filter(None, Some("Maharashtra"));
        assert!(matches!(filter, Some(LocationFilter::Name(_))));

        assert!(location_filter(None, Some("  ")).is_none());
    }

    #[test]
    fn category_resolution_ignores_unknown_and_sentinel() {
        assert_eq!(
            resolve_category(Some("Engineering"), None),
            Some("Engineering".to_string())
        );
        assert_eq!(resolve_category(Some("All"), None), None);
        assert_eq!(resolve_category(Some("Astrology"), None), None);
        assert_eq!(resolve_category(None, None), None);
    }

    #[test]
    fn stream_slug_is_the_category_fallback() {
        assert_eq!(
            resolve_category(None, Some("data-science")),
            Some("Data Science".to_string())
        );
        // A supplied category suppresses the stream fallback even when unknown.
        assert_eq!(resolve_category(Some("Astrology"), Some("mba")), None);
    }
}
