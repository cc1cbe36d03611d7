//! Admin console enquiry endpoints: paginated listing with status and date
//! filters, single fetch, and status/notes updates.

use axum::extract::{Path, Query, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::models::enquiry::{ENQUIRY_STATUSES, EnquiryListFilter};
use crate::models::{Enquiry, ObjectId};
use crate::routes::Pagination;
use crate::state::AppState;

fn parse_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<DateTime<Utc>>()
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnquiryListQuery {
    status: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    page: Option<String>,
    limit: Option<String>,
    sort: Option<String>,
}

async fn list_enquiries(
    State(state): State<AppState>,
    Query(query): Query<EnquiryListQuery>,
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
        .map_or(20, |l| l.clamp(1, 100));

    // Unknown statuses are ignored rather than rejected, like the public
    // listing's lenient enum handling.
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| ENQUIRY_STATUSES.contains(s))
        .map(str::to_string);

    let filter = EnquiryListFilter {
        status,
        from: parse_date(query.from_date.as_deref()),
        to: parse_date(query.to_date.as_deref()),
        newest_first: query.sort.as_deref() != Some("oldest"),
    };

    let db = state.db();
    let (total, enquiries) = tokio::try_join!(
        Enquiry::count_admin(db, &filter),
        Enquiry::list_admin(db, &filter, limit, page.saturating_sub(1).saturating_mul(limit)),
    )?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "enquiries": enquiries,
            "pagination": Pagination::new(page, limit, total),
        },
    })))
}

async fn get_enquiry_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::enquiry_not_found())?;
    let enquiry = Enquiry::find_with_course(state.db(), &id)
        .await?
        .ok_or_else(AppError::enquiry_not_found)?;

    Ok(Json(json!({ "success": true, "data": enquiry })))
}

#[derive(Debug, Default, Deserialize)]
struct UpdateEnquiryBody {
    status: Option<String>,
    notes: Option<String>,
}

async fn update_enquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateEnquiryBody>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::enquiry_not_found())?;

    if let Some(ref status) = body.status {
        if !ENQUIRY_STATUSES.contains(&status.as_str()) {
            return Err(AppError::BadRequest(
                "Invalid status. Use: pending, reviewed, resolved".to_string(),
            ));
        }
    }

    let enquiry = Enquiry::update_admin(
        state.db(),
        &id,
        body.status.as_deref(),
        body.notes.as_deref(),
    )
    .await?
    .ok_or_else(AppError::enquiry_not_found)?;

    Ok(Json(json!({ "success": true, "data": enquiry })))
}

/// Create the admin enquiry router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/enquiries", get(list_enquiries))
        .route("/api/admin/enquiries/{id}", get(get_enquiry_by_id))
        .route("/api/admin/enquiries/{id}", put(update_enquiry))
}

#[cfg(test)]
mod tests {
    use super::parse_date;

    #[test]
    fn parses_rfc3339_and_plain_dates() {
        assert!(parse_date(Some("2024-06-01T10:30:00Z")).is_some());
        let midnight = parse_date(Some("2024-06-01")).unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date(Some("not-a-date")).is_none());
        assert!(parse_date(Some("")).is_none());
        assert!(parse_date(None).is_none());
    }
}
