//! Admin console catalog endpoints: states, cities and courses.
//!
//! States and cities derive their slug from the name and reject duplicates
//! outright; courses disambiguate with a numeric suffix instead, matching
//! the college slug policy.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::models::course::CourseInput;
use crate::models::location::{CityInput, StateInput};
use crate::models::{City, Course, ObjectId, State as StateModel};
use crate::services::slug::slugify;
use crate::state::AppState;

fn trimmed(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ----- States -----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateListQuery {
    country_id: Option<ObjectId>,
}

async fn list_states(
    State(state): State<AppState>,
    Query(query): Query<StateListQuery>,
) -> AppResult<Json<Value>> {
    let states = StateModel::list(state.db(), query.country_id.as_ref(), false).await?;
    Ok(Json(json!({ "success": true, "data": states })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateStateBody {
    country_id: Option<ObjectId>,
    name: Option<String>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
}

async fn create_state(
    State(state): State<AppState>,
    Json(body): Json<CreateStateBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (Some(country_id), Some(name)) = (body.country_id, trimmed(body.name.as_deref())) else {
        return Err(AppError::BadRequest(
            "countryId and name are required".to_string(),
        ));
    };

    let slug = slugify(&name);
    if StateModel::slug_exists(state.db(), &slug).await? {
        return Err(AppError::BadRequest(
            "State with this slug already exists".to_string(),
        ));
    }

    let created = StateModel::create(
        state.db(),
        &country_id,
        &name,
        &slug,
        body.is_active.unwrap_or(true),
        body.sort_order,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

async fn update_state(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<StateInput>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::state_not_found())?;
    let updated = StateModel::update(state.db(), &id, input)
        .await?
        .ok_or_else(AppError::state_not_found)?;

    Ok(Json(json!({ "success": true, "data": updated })))
}

// ----- Cities -----

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CityListQuery {
    state_id: Option<ObjectId>,
}

async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CityListQuery>,
) -> AppResult<Json<Value>> {
    let cities = City::list(state.db(), query.state_id.as_ref(), false).await?;
    Ok(Json(json!({ "success": true, "data": cities })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCityBody {
    state_id: Option<ObjectId>,
    name: Option<String>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
}

async fn create_city(
    State(state): State<AppState>,
    Json(body): Json<CreateCityBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let (Some(state_id), Some(name)) = (body.state_id, trimmed(body.name.as_deref())) else {
        return Err(AppError::BadRequest(
            "stateId and name are required".to_string(),
        ));
    };

    let slug = slugify(&name);
    if City::slug_exists(state.db(), &state_id, &slug).await? {
        return Err(AppError::BadRequest(
            "City with this slug already exists in this state".to_string(),
        ));
    }

    let created = City::create(
        state.db(),
        &state_id,
        &name,
        &slug,
        body.is_active.unwrap_or(true),
        body.sort_order,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CityInput>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::city_not_found())?;
    let updated = City::update(state.db(), &id, input)
        .await?
        .ok_or_else(AppError::city_not_found)?;

    Ok(Json(json!({ "success": true, "data": updated })))
}

// ----- Courses -----

async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let courses = Course::list_all(state.db()).await?;
    Ok(Json(json!({ "success": true, "data": courses })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCourseBody {
    name: Option<String>,
    is_active: Option<bool>,
    sort_order: Option<i32>,
}

async fn create_course(
    State(state): State<AppState>,
    Json(body): Json<CreateCourseBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let Some(name) = trimmed(body.name.as_deref()) else {
        return Err(AppError::BadRequest("name is required".to_string()));
    };

    let base_slug = slugify(&name);
    let slug = Course::ensure_unique_slug(state.db(), &base_slug).await?;
    let created = Course::create(
        state.db(),
        &name,
        &slug,
        body.is_active.unwrap_or(true),
        body.sort_order,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": created })),
    ))
}

async fn get_course_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::course_not_found())?;
    let course = Course::find_by_id(state.db(), &id)
        .await?
        .ok_or_else(AppError::course_not_found)?;

    Ok(Json(json!({ "success": true, "data": course })))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<CourseInput>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::course_not_found())?;
    let course = Course::update(state.db(), &id, input)
        .await?
        .ok_or_else(AppError::course_not_found)?;

    Ok(Json(json!({ "success": true, "data": course })))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    let id: ObjectId = id.parse().map_err(|_| AppError::course_not_found())?;
    if !Course::delete(state.db(), &id).await? {
        return Err(AppError::course_not_found());
    }

    Ok(Json(json!({ "success": true, "message": "Course deleted" })))
}

/// Create the admin catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/admin/states", get(list_states).post(create_state))
        .route("/api/admin/states/{id}", put(update_state))
        .route("/api/admin/cities", get(list_cities).post(create_city))
        .route("/api/admin/cities/{id}", put(update_city))
        .route("/api/admin/courses", get(list_courses).post(create_course))
        .route("/api/admin/courses/{id}", get(get_course_by_id))
        .route("/api/admin/courses/{id}", put(update_course))
        .route("/api/admin/courses/{id}", delete(delete_course))
}
