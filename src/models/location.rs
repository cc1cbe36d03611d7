//! Location reference entities: Country, State, City.
//!
//! A two-level hierarchy under Country; City belongs to exactly one State.
//! These are lookup targets for the college write path, where their names
//! are cached onto the college record.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::object_id::ObjectId;

/// Country record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub id: ObjectId,
    pub name: String,
    pub code: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// State record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub id: ObjectId,
    pub country_id: ObjectId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub sort_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// City record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: ObjectId,
    pub state_id: ObjectId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub sort_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin update payload for a state; slug is immutable and not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateInput {
    pub country_id: Option<ObjectId>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

/// Admin update payload for a city; slug is immutable and not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInput {
    pub state_id: Option<ObjectId>,
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl Country {
    /// List active countries ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>> {
        let countries = sqlx::query_as::<_, Self>(
            "SELECT * FROM country WHERE is_active = TRUE ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .context("failed to list countries")?;

        Ok(countries)
    }

    /// Find a country by its ISO code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Self>> {
        let country = sqlx::query_as::<_, Self>("SELECT * FROM country WHERE code = $1")
            .bind(code)
            .fetch_optional(pool)
            .await
            .context("failed to fetch country by code")?;

        Ok(country)
    }
}

impl State {
    /// Find a state by id.
    pub async fn find_by_id(pool: &PgPool, id: &ObjectId) -> Result<Option<Self>> {
        let state = sqlx::query_as::<_, Self>("SELECT * FROM state WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch state by id")?;

        Ok(state)
    }

    /// List states ordered by (sort_order, name), optionally scoped to a
    /// country, optionally restricted to active records.
    pub async fn list(
        pool: &PgPool,
        country_id: Option<&ObjectId>,
        active_only: bool,
    ) -> Result<Vec<Self>> {
        let states = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM state
            WHERE ($1::text IS NULL OR country_id = $1)
              AND (NOT $2 OR is_active = TRUE)
            ORDER BY sort_order NULLS LAST, name
            "#,
        )
        .bind(country_id.map(ObjectId::as_str))
        .bind(active_only)
        .fetch_all(pool)
        .await
        .context("failed to list states")?;

        Ok(states)
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM state WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .context("failed to check state slug existence")?;

        Ok(exists)
    }

    /// Create a new state.
    pub async fn create(
        pool: &PgPool,
        country_id: &ObjectId,
        name: &str,
        slug: &str,
        is_active: bool,
        sort_order: Option<i32>,
    ) -> Result<Self> {
        let state = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO state (id, country_id, name, slug, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(country_id)
        .bind(name)
        .bind(slug)
        .bind(is_active)
        .bind(sort_order)
        .fetch_one(pool)
        .await
        .context("failed to create state")?;

        Ok(state)
    }

    /// Update a state. Returns the updated record if it exists.
    pub async fn update(pool: &PgPool, id: &ObjectId, input: StateInput) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let country_id = input.country_id.unwrap_or(current.country_id);
        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(current.name);
        let is_active = input.is_active.unwrap_or(current.is_active);
        let sort_order = input.sort_order.or(current.sort_order);

        let state = sqlx::query_as::<_, Self>(
            r#"
            UPDATE state
            SET country_id = $1, name = $2, is_active = $3, sort_order = $4, updated_at = now()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&country_id)
        .bind(&name)
        .bind(is_active)
        .bind(sort_order)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update state")?;

        Ok(state)
    }
}

impl City {
    /// Find a city by id.
    pub async fn find_by_id(pool: &PgPool, id: &ObjectId) -> Result<Option<Self>> {
        let city = sqlx::query_as::<_, Self>("SELECT * FROM city WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch city by id")?;

        Ok(city)
    }

    /// List cities ordered by (sort_order, name), optionally scoped to a
    /// state, optionally restricted to active records.
    pub async fn list(
        pool: &PgPool,
        state_id: Option<&ObjectId>,
        active_only: bool,
    ) -> Result<Vec<Self>> {
        let cities = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM city
            WHERE ($1::text IS NULL OR state_id = $1)
              AND (NOT $2 OR is_active = TRUE)
            ORDER BY sort_order NULLS LAST, name
            "#,
        )
        .bind(state_id.map(ObjectId::as_str))
        .bind(active_only)
        .fetch_all(pool)
        .await
        .context("failed to list cities")?;

        Ok(cities)
    }

    /// Check whether a slug is already taken within a state.
    pub async fn slug_exists(pool: &PgPool, state_id: &ObjectId, slug: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM city WHERE state_id = $1 AND slug = $2)",
        )
        .bind(state_id)
        .bind(slug)
        .fetch_one(pool)
        .await
        .context("failed to check city slug existence")?;

        Ok(exists)
    }

    /// Create a new city.
    pub async fn create(
        pool: &PgPool,
        state_id: &ObjectId,
        name: &str,
        slug: &str,
        is_active: bool,
        sort_order: Option<i32>,
    ) -> Result<Self> {
        let city = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO city (id, state_id, name, slug, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(state_id)
        .bind(name)
        .bind(slug)
        .bind(is_active)
        .bind(sort_order)
        .fetch_one(pool)
        .await
        .context("failed to create city")?;

        Ok(city)
    }

    /// Update a city. Returns the updated record if it exists.
    pub async fn update(pool: &PgPool, id: &ObjectId, input: CityInput) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let state_id = input.state_id.unwrap_or(current.state_id);
        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(current.name);
        let is_active = input.is_active.unwrap_or(current.is_active);
        let sort_order = input.sort_order.or(current.sort_order);

        let city = sqlx::query_as::<_, Self>(
            r#"
            UPDATE city
            SET state_id = $1, name = $2, is_active = $3, sort_order = $4, updated_at = now()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&state_id)
        .bind(&name)
        .bind(is_active)
        .bind(sort_order)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update city")?;

        Ok(city)
    }
}
