//! Admin console college endpoints: list, create, fetch, update, activate
//! and delete. Authentication sits in front of these at the deployment
//! layer; the handlers themselves only enforce payload rules.
//!
//! Id-shaped path parameters are format-checked and treated as not-found
//! when malformed, unlike the listing query gate which reports 400.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::models::college::{CollegeInput, is_college_category, normalize_course_fees};
use crate::models::{College, Country, CourseFee, FeePeriod, ObjectId};
use crate::routes::Pagination;
use crate::services::location::resolve_names;
use crate::services::slug::slugify;
use crate::state::AppState;

fn parse_path_id(raw: &str) -> Result<ObjectId, AppError> {
    raw.parse().map_err(|_| AppError::college_not_found())
}

fn trimmed(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn validate_fee_period(raw: Option<&str>) -> Result<(), AppError> {
    match raw {
        Some(p) if FeePeriod::parse(p).is_none() => Err(AppError::BadRequest(
            "feePeriod must be year or semester".to_string(),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AdminListQuery {
    category: Option<String>,
    state_id: Option<String>,
    city_id: Option<String>,
    page: Option<String>,
    limit: Option<String>,
}

async fn admin_list_colleges(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
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
        .map_or(10, |l| l.clamp(1, 100));

    let category = trimmed(query.category.as_deref());
    let state_id = trimmed(query.state_id.as_deref());
    let city_id = trimmed(query.city_id.as_deref());

    let db = state.db();
    let (total, colleges) = tokio::try_join!(
        College::admin_count(db, category.as_deref(), state_id.as_deref(), city_id.as_deref()),
        College::admin_list(
            db,
            category.as_deref(),
            state_id.as_deref(),
            city_id.as_deref(),
            limit,
            page.saturating_sub(1).saturating_mul(limit),
        ),
    )?;

    Ok(Json(json!({
        "success": true,
        "data": {
            "colleges": colleges,
            "pagination": Pagination::new(page, limit, total),
        },
    })))
}

/// Apply the courses/courseFees tagged-union rule: when the rich structure
/// is supplied it is authoritative and the name array is regenerated from
/// it; a bare name array is honored only when no rich structure came along.
fn apply_course_fields(input: &mut CollegeInput) -> Option<Vec<CourseFee>> {
    let fees = normalize_course_fees(input.course_fees.take()?);
    input.courses = Some(fees.iter().map(|f| f.course_name.clone()).collect());
    Some(fees)
}

async fn create_college(
    State(state): State<AppState>,
    Json(mut input): Json<CollegeInput>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let course_fees = apply_course_fields(&mut input).unwrap_or_default();

    let Some(name) = trimmed(input.name.as_deref()) else {
        return Err(AppError::BadRequest("name is required".to_string()));
    };

    let country_id = match input.country_id {
        Some(id) => id,
        None => Country::find_by_code(state.db(), "IN")
            .await?
            .map(|c| c.id)
            .ok_or_else(|| AppError::BadRequest("countryId is required".to_string()))?,
    };

    let (Some(state_id), Some(city_id)) = (input.state_id, input.city_id) else {
        return Err(AppError::BadRequest(
            "stateId and cityId are required".to_string(),
        ));
    };

    let category = trimmed(input.category.as_deref())
        .ok_or_else(|| AppError::BadRequest("category is required".to_string()))?;
    if !is_college_category(&category) {
        return Err(AppError::BadRequest("Invalid category".to_string()));
    }

    validate_fee_period(input.fee_period.as_deref())?;

    // Cache display names from the referenced records unless the payload
    // supplied all of them itself.
    let (state_name, city_name, location_display) = if input.state_name.is_none()
        || input.city_name.is_none()
        || input.location_display.is_none()
    {
        let resolved = resolve_names(state.db(), Some(&state_id), Some(&city_id)).await?;
        (
            input.state_name.unwrap_or(resolved.state_name),
            input.city_name.unwrap_or(resolved.city_name),
            input.location_display.unwrap_or(resolved.location_display),
        )
    } else {
        (
            input.state_name.unwrap_or_default(),
            input.city_name.unwrap_or_default(),
            input.location_display.unwrap_or_default(),
        )
    };

    let base_slug = slugify(&name);
    let slug = College::ensure_unique_slug(state.db(), &base_slug).await?;

    let now = Utc::now();
    let college = College {
        id: ObjectId::generate(),
        slug,
        name,
        short_name: input.short_name,
        country_id,
        state_id,
        city_id,
        state_name,
        city_name,
        address: input.address,
        pin_code: input.pin_code,
        location_display,
        category,
        courses: input.courses.unwrap_or_default(),
        course_fees,
        badge: input.badge,
        fee: input.fee,
        fee_amount: input.fee_amount,
        fee_period: input.fee_period,
        rating: input.rating,
        nirf_rank: input.nirf_rank,
        placement_rate: input.placement_rate,
        avg_package: input.avg_package,
        description: input.description,
        highlights: input.highlights.unwrap_or_default(),
        eligibility: input.eligibility,
        facilities: input.facilities.unwrap_or_default(),
        website: input.website,
        phone: input.phone,
        email: input.email,
        logo_url: input.logo_url,
        cover_image_url: input.cover_image_url,
        gallery_urls: input.gallery_urls.unwrap_or_default(),
        is_active: input.is_active.unwrap_or(true),
        is_verified: input.is_verified.unwrap_or(false),
        created_at: now,
        updated_at: now,
    };

    college.insert(state.db()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": college })),
    ))
}

async fn get_college_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_path_id(&id)?;
    let college = College::find_by_id(state.db(), &id)
        .await?
        .ok_or_else(AppError::college_not_found)?;

    Ok(Json(json!({ "success": true, "data": college })))
}

async fn update_college(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<CollegeInput>,
) -> AppResult<Json<Value>> {
    let id = parse_path_id(&id)?;
    let mut college = College::find_by_id(state.db(), &id)
        .await?
        .ok_or_else(AppError::college_not_found)?;

    let course_fees = apply_course_fields(&mut input);
    validate_fee_period(input.fee_period.as_deref())?;

    if let Some(category) = trimmed(input.category.as_deref()) {
        if !is_college_category(&category) {
            return Err(AppError::BadRequest("Invalid category".to_string()));
        }
        college.category = category;
    }

    let location_changed = input.state_id.is_some() || input.city_id.is_some();
    let names_supplied = input.state_name.is_some()
        && input.city_name.is_some()
        && input.location_display.is_some();

    if let Some(name) = trimmed(input.name.as_deref()) {
        college.name = name;
    }
    if let Some(state_id) = input.state_id.clone() {
        college.state_id = state_id;
    }
    if let Some(city_id) = input.city_id.clone() {
        college.city_id = city_id;
    }

    // Refresh cached location names from the newly referenced ids when the
    // payload changed a reference without supplying all display strings.
    if location_changed && !names_supplied {
        let resolved = resolve_names(
            state.db(),
            input.state_id.as_ref(),
            input.city_id.as_ref(),
        )
        .await?;
        if input.state_id.is_some() {
            college.state_name = resolved.state_name;
        }
        if input.city_id.is_some() {
            college.city_name = resolved.city_name;
        }
        college.location_display = resolved.location_display;
    }
    if let Some(state_name) = input.state_name {
        college.state_name = state_name;
    }
    if let Some(city_name) = input.city_name {
        college.city_name = city_name;
    }
    if let Some(location_display) = input.location_display {
        college.location_display = location_display;
    }

    if let Some(short_name) = input.short_name {
        college.short_name = Some(short_name);
    }
    if let Some(country_id) = input.country_id {
        college.country_id = country_id;
    }
    if let Some(address) = input.address {
        college.address = Some(address);
    }
    if let Some(pin_code) = input.pin_code {
        college.pin_code = Some(pin_code);
    }
    if let Some(courses) = input.courses {
        college.courses = courses;
    }
    if let Some(course_fees) = course_fees {
        college.course_fees = course_fees;
    }
    if let Some(badge) = input.badge {
        college.badge = Some(badge);
    }
    if let Some(fee) = input.fee {
        college.fee = Some(fee);
    }
    if let Some(fee_amount) = input.fee_amount {
        college.fee_amount = Some(fee_amount);
    }
    if let Some(fee_period) = input.fee_period {
        college.fee_period = Some(fee_period);
    }
    if let Some(rating) = input.rating {
        college.rating = Some(rating);
    }
    if let Some(nirf_rank) = input.nirf_rank {
        college.nirf_rank = Some(nirf_rank);
    }
    if let Some(placement_rate) = input.placement_rate {
        college.placement_rate = Some(placement_rate);
    }
    if let Some(avg_package) = input.avg_package {
        college.avg_package = Some(avg_package);
    }
    if let Some(description) = input.description {
        college.description = Some(description);
    }
    if let Some(highlights) = input.highlights {
        college.highlights = highlights;
    }
    if let Some(eligibility) = input.eligibility {
        college.eligibility = Some(eligibility);
    }
    if let Some(facilities) = input.facilities {
        college.facilities = facilities;
    }
    if let Some(website) = input.website {
        college.website = Some(website);
    }
    if let Some(phone) = input.phone {
        college.phone = Some(phone);
    }
    if let Some(email) = input.email {
        college.email = Some(email);
    }
    if let Some(logo_url) = input.logo_url {
        college.logo_url = Some(logo_url);
    }
    if let Some(cover_image_url) = input.cover_image_url {
        college.cover_image_url = Some(cover_image_url);
    }
    if let Some(gallery_urls) = input.gallery_urls {
        college.gallery_urls = gallery_urls;
    }
    if let Some(is_active) = input.is_active {
        college.is_active = is_active;
    }
    if let Some(is_verified) = input.is_verified {
        college.is_verified = is_verified;
    }

    college.updated_at = Utc::now();
    college.replace(state.db()).await?;

    Ok(Json(json!({ "success": true, "data": college })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusBody {
    is_active: Option<bool>,
}

async fn update_college_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<Value>> {
    let id = parse_path_id(&id)?;
    let Some(is_active) = body.is_active else {
        return Err(AppError::BadRequest(
            "isActive must be true or false".to_string(),
        ));
    };

    let college = College::set_active(state.db(), &id, is_active)
        .await?
        .ok_or_else(AppError::college_not_found)?;

    let message = if college.is_active {
        "College activated"
    } else {
        "College deactivated"
    };

    Ok(Json(json!({
        "success": true,
        "data": college,
        "message": message,
    })))
}

async fn delete_college(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id = parse_path_id(&id)?;
    if !College::delete(state.db(), &id).await? {
        return Err(AppError::college_not_found());
    }

    Ok(Json(json!({ "success": true, "message": "College deleted" })))
}

/// Create the admin college router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/colleges",
            get(admin_list_colleges).post(create_college),
        )
        .route("/api/admin/colleges/{id}", get(get_college_by_id))
        .route("/api/admin/colleges/{id}", put(update_college))
        .route("/api/admin/colleges/{id}/status", patch(update_college_status))
        .route("/api/admin/colleges/{id}", delete(delete_college))
}
