//! Public stream endpoints.
//!
//! A "stream" is a course viewed as a browsable taxonomy entry, enriched
//! with the count of active colleges whose course list contains its name.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppResult;
use crate::models::{College, Course, ObjectId};
use crate::routes::Pagination;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct StreamView {
    id: ObjectId,
    name: String,
    slug: String,
    college_count: i64,
    icon_url: Option<String>,
    icon_key: String,
}

impl StreamView {
    fn new(course: Course, counts: &HashMap<String, i64>) -> Self {
        let college_count = counts.get(&course.name).copied().unwrap_or(0);
        Self {
            id: course.id,
            name: course.name,
            icon_key: course.slug.clone(),
            slug: course.slug,
            college_count,
            icon_url: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamListQuery {
    page: Option<String>,
    limit: Option<String>,
    sort_by: Option<String>,
    order: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PopularStreamQuery {
    limit: Option<String>,
}

async fn stream_views(state: &AppState) -> AppResult<Vec<StreamView>> {
    let (courses, counts) = tokio::try_join!(
        Course::list_active(state.db()),
        College::count_by_course_name(state.db()),
    )?;

    Ok(courses
        .into_iter()
        .map(|course| StreamView::new(course, &counts))
        .collect())
}

/// In-memory listing over the full active course set: filter, sort, page.
/// The catalog is small enough that this never goes back to the database.
async fn list_streams(
    State(state): State<AppState>,
    Query(query): Query<StreamListQuery>,
) -> AppResult<Json<Value>> {
    let page = query
        .page
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(1, |p| p.max(1));
    let limit = query
        .limit
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(20, |l| l.clamp(1, 50));
    let by_name = query
        .sort_by
        .as_deref()
        .is_some_and(|s| s.trim().eq_ignore_ascii_case("name"));
    let ascending = query
        .order
        .as_deref()
        .is_some_and(|o| o.trim().eq_ignore_ascii_case("asc"));
    let search = query.search.as_deref().unwrap_or("").trim().to_lowercase();

    let mut streams = stream_views(&state).await?;

    if !search.is_empty() {
        streams.retain(|s| s.name.to_lowercase().contains(&search));
    }

    sort_streams(&mut streams, by_name, ascending);

    let total = streams.len() as i64;
    let start = page.saturating_sub(1).saturating_mul(limit) as usize;
    let paginated: Vec<StreamView> = streams.into_iter().skip(start).take(limit as usize).collect();

    Ok(Json(json!({
        "success": true,
        "data": {
            "streams": paginated,
            "pagination": Pagination::new(page, limit, total),
        },
    })))
}

/// Stable sort on the requested key in the requested direction. Equal keys
/// keep their catalog order either way, so the comparator is reversed
/// rather than the sorted result.
fn sort_streams(streams: &mut [StreamView], by_name: bool, ascending: bool) {
    match (by_name, ascending) {
        (true, true) => streams.sort_by(|a, b| a.name.cmp(&b.name)),
        (true, false) => streams.sort_by(|a, b| b.name.cmp(&a.name)),
        (false, true) => streams.sort_by(|a, b| a.college_count.cmp(&b.college_count)),
        (false, false) => streams.sort_by(|a, b| b.college_count.cmp(&a.college_count)),
    }
}

/// Popular streams: active courses with at least one college, most offered
/// first, capped at the requested limit (default 9).
async fn list_popular_streams(
    State(state): State<AppState>,
    Query(query): Query<PopularStreamQuery>,
) -> AppResult<Json<Value>> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(9, |l| l.clamp(1, 50));

    let mut streams = stream_views(&state).await?;
    streams.retain(|s| s.college_count > 0);
    streams.sort_by(|a, b| b.college_count.cmp(&a.college_count));
    streams.truncate(limit as usize);

    Ok(Json(json!({ "success": true, "data": streams })))
}

/// Create the public streams router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/streams", get(list_streams))
        .route("/api/streams/popular", get(list_popular_streams))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(name: &str, count: i64) -> StreamView {
        StreamView {
            id: ObjectId::generate(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            college_count: count,
            icon_url: None,
            icon_key: name.to_lowercase(),
        }
    }

    fn names(streams: &[StreamView]) -> Vec<&str> {
        streams.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn descending_count_sort_keeps_catalog_order_for_ties() {
        let mut streams = vec![stream("Arts", 3), stream("Commerce", 5), stream("Design", 3)];
        sort_streams(&mut streams, false, false);
        assert_eq!(names(&streams), ["Commerce", "Arts", "Design"]);
    }

    #[test]
    fn ascending_count_sort_keeps_catalog_order_for_ties() {
        let mut streams = vec![stream("Arts", 3), stream("Commerce", 5), stream("Design", 3)];
        sort_streams(&mut streams, false, true);
        assert_eq!(names(&streams), ["Arts", "Design", "Commerce"]);
    }

    #[test]
    fn name_sort_honours_direction() {
        let mut streams = vec![stream("Design", 1), stream("Arts", 2)];
        sort_streams(&mut streams, true, true);
        assert_eq!(names(&streams), ["Arts", "Design"]);
        sort_streams(&mut streams, true, false);
        assert_eq!(names(&streams), ["Design", "Arts"]);
    }
}
