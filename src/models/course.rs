//! Course (stream) catalog model.
//!
//! Courses are referenced from colleges by name, not id: `College.courses`
//! stores course name strings so listing filters and free-text search work
//! without joins. The course-id listing filter resolves to a name first.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use super::object_id::ObjectId;

/// Course record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub sort_order: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin update payload; slug is immutable and not accepted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseInput {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl Course {
    /// Find a course by id.
    pub async fn find_by_id(pool: &PgPool, id: &ObjectId) -> Result<Option<Self>> {
        let course = sqlx::query_as::<_, Self>("SELECT * FROM course WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch course by id")?;

        Ok(course)
    }

    /// List active courses ordered by (sort_order, name).
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Self>> {
        let courses = sqlx::query_as::<_, Self>(
            "SELECT * FROM course WHERE is_active = TRUE ORDER BY sort_order NULLS LAST, name",
        )
        .fetch_all(pool)
        .await
        .context("failed to list active courses")?;

        Ok(courses)
    }

    /// List all courses ordered by (sort_order, name), including inactive.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Self>> {
        let courses = sqlx::query_as::<_, Self>(
            "SELECT * FROM course ORDER BY sort_order NULLS LAST, name",
        )
        .fetch_all(pool)
        .await
        .context("failed to list courses")?;

        Ok(courses)
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM course WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .context("failed to check course slug existence")?;

        Ok(exists)
    }

    /// Ensure a unique slug by appending -2, -3, ... while the base is taken.
    pub async fn ensure_unique_slug(pool: &PgPool, base: &str) -> Result<String> {
        let mut slug = base.to_string();
        let mut counter = 2u32;
        while Self::slug_exists(pool, &slug).await? {
            slug = format!("{base}-{counter}");
            counter += 1;
        }
        Ok(slug)
    }

    /// Create a new course.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        slug: &str,
        is_active: bool,
        sort_order: Option<i32>,
    ) -> Result<Self> {
        let course = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO course (id, name, slug, is_active, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(name)
        .bind(slug)
        .bind(is_active)
        .bind(sort_order)
        .fetch_one(pool)
        .await
        .context("failed to create course")?;

        Ok(course)
    }

    /// Update a course. Returns the updated record if it exists.
    pub async fn update(pool: &PgPool, id: &ObjectId, input: CourseInput) -> Result<Option<Self>> {
        let Some(current) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let name = input
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or(current.name);
        let is_active = input.is_active.unwrap_or(current.is_active);
        let sort_order = input.sort_order.or(current.sort_order);

        let course = sqlx::query_as::<_, Self>(
            r#"
            UPDATE course
            SET name = $1, is_active = $2, sort_order = $3, updated_at = now()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&name)
        .bind(is_active)
        .bind(sort_order)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update course")?;

        Ok(course)
    }

    /// Delete a course. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: &ObjectId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM course WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete course")?;

        Ok(result.rows_affected() > 0)
    }
}
