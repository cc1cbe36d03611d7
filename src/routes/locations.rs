//! Public lookup endpoints for filter dropdowns: countries, states, cities
//! and the course catalog. Active records only, slim projections.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{AppError, AppResult};
use crate::models::{City, Country, Course, ObjectId, State as StateModel};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CountryView {
    id: ObjectId,
    name: String,
    code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NamedView {
    id: ObjectId,
    name: String,
    slug: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CityView {
    id: ObjectId,
    name: String,
    slug: String,
    state_id: ObjectId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatesQuery {
    country_id: Option<ObjectId>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CitiesQuery {
    state_id: Option<ObjectId>,
}

async fn get_countries(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let countries: Vec<CountryView> = Country::list_active(state.db())
        .await?
        .into_iter()
        .map(|c| CountryView {
            id: c.id,
            name: c.name,
            code: c.code,
        })
        .collect();

    Ok(Json(json!({ "success": true, "data": countries })))
}

async fn get_states(
    State(state): State<AppState>,
    Query(query): Query<StatesQuery>,
) -> AppResult<Json<Value>> {
    let states: Vec<NamedView> = StateModel::list(state.db(), query.country_id.as_ref(), true)
        .await?
        .into_iter()
        .map(|s| NamedView {
            id: s.id,
            name: s.name,
            slug: s.slug,
        })
        .collect();

    Ok(Json(json!({ "success": true, "data": states })))
}

async fn get_cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> AppResult<Json<Value>> {
    let Some(state_id) = query.state_id else {
        return Err(AppError::BadRequest("stateId is required".to_string()));
    };

    let cities: Vec<CityView> = City::list(state.db(), Some(&state_id), true)
        .await?
        .into_iter()
        .map(|c| CityView {
            id: c.id,
            name: c.name,
            slug: c.slug,
            state_id: c.state_id,
        })
        .collect();

    Ok(Json(json!({ "success": true, "data": cities })))
}

async fn get_courses(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let courses: Vec<NamedView> = Course::list_active(state.db())
        .await?
        .into_iter()
        .map(|c| NamedView {
            id: c.id,
            name: c.name,
            slug: c.slug,
        })
        .collect();

    Ok(Json(json!({ "success": true, "data": courses })))
}

/// Create the public lookup router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/countries", get(get_countries))
        .route("/api/states", get(get_states))
        .route("/api/cities", get(get_cities))
        .route("/api/courses", get(get_courses))
}
