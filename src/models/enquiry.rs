//! Lead-capture models: Enquiry, CounsellingEnquiry, CollegeApplication.
//!
//! Each is created by a public submission endpoint and carries a status
//! lifecycle mutated only by admin updates, never by the public.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::object_id::ObjectId;

/// Status lifecycle for plain enquiries.
pub const ENQUIRY_STATUSES: [&str; 3] = ["pending", "reviewed", "resolved"];

/// Status lifecycle for counselling enquiries.
pub const COUNSELLING_STATUSES: [&str; 3] = ["new", "contacted", "closed"];

/// Status lifecycle for college applications.
pub const APPLICATION_STATUSES: [&str; 2] = ["submitted", "processed"];

/// Accepted counselling enquiry sources.
pub const COUNSELLING_SOURCES: [&str; 2] = ["cta", "college_page"];

/// Course enquiry record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: ObjectId,
    pub mobile: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<ObjectId>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Counselling enquiry record (CTA and college-page forms).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CounsellingEnquiry {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub course_interest: Option<String>,
    pub current_status: Option<String>,
    pub message: Option<String>,
    pub college_id: Option<ObjectId>,
    pub status: String,
    pub source: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// College application record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CollegeApplication {
    pub id: ObjectId,
    pub college_id: ObjectId,
    pub email: String,
    pub phone: String,
    pub name: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal course reference attached to admin enquiry views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRef {
    pub id: ObjectId,
    pub name: String,
    pub slug: String,
}

/// Enquiry joined with its referenced course, for the admin console.
#[derive(Debug, Clone, Serialize)]
pub struct EnquiryWithCourse {
    #[serde(flatten)]
    pub enquiry: Enquiry,
    pub course: Option<CourseRef>,
}

#[derive(Debug, sqlx::FromRow)]
struct EnquiryJoinRow {
    id: ObjectId,
    mobile: String,
    name: Option<String>,
    email: Option<String>,
    description: Option<String>,
    course_id: Option<ObjectId>,
    status: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    course_name: Option<String>,
    course_slug: Option<String>,
}

impl From<EnquiryJoinRow> for EnquiryWithCourse {
    fn from(row: EnquiryJoinRow) -> Self {
        let course = match (&row.course_id, row.course_name, row.course_slug) {
            (Some(id), Some(name), Some(slug)) => Some(CourseRef {
                id: id.clone(),
                name,
                slug,
            }),
            _ => None,
        };
        Self {
            enquiry: Enquiry {
                id: row.id,
                mobile: row.mobile,
                name: row.name,
                email: row.email,
                description: row.description,
                course_id: row.course_id,
                status: row.status,
                notes: row.notes,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            course,
        }
    }
}

/// Admin list filters for enquiries.
#[derive(Debug, Default)]
pub struct EnquiryListFilter {
    /// Validated member of [`ENQUIRY_STATUSES`]; unknown values are ignored upstream.
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Oldest-first when false.
    pub newest_first: bool,
}

impl Enquiry {
    /// Create a new enquiry with status "pending".
    pub async fn create(
        pool: &PgPool,
        mobile: &str,
        name: Option<&str>,
        email: Option<&str>,
        description: Option<&str>,
        course_id: Option<&ObjectId>,
    ) -> Result<Self> {
        let enquiry = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO enquiry (id, mobile, name, email, description, course_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(mobile)
        .bind(name)
        .bind(email)
        .bind(description)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .context("failed to create enquiry")?;

        Ok(enquiry)
    }

    /// Paginated admin listing with optional status and date-range filters.
    pub async fn list_admin(
        pool: &PgPool,
        filter: &EnquiryListFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<EnquiryWithCourse>> {
        let direction = if filter.newest_first { "DESC" } else { "ASC" };
        let sql = format!(
            r#"
            SELECT e.id, e.mobile, e.name, e.email, e.description, e.course_id,
                   e.status, e.notes, e.created_at, e.updated_at,
                   c.name AS course_name, c.slug AS course_slug
            FROM enquiry e
            LEFT JOIN course c ON c.id = e.course_id
            WHERE ($1::text IS NULL OR e.status = $1)
              AND ($2::timestamptz IS NULL OR e.created_at >= $2)
              AND ($3::timestamptz IS NULL OR e.created_at <= $3)
            ORDER BY e.created_at {direction}
            LIMIT $4 OFFSET $5
            "#,
        );

        let rows = sqlx::query_as::<_, EnquiryJoinRow>(&sql)
            .bind(&filter.status)
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .context("failed to list enquiries")?;

        Ok(rows.into_iter().map(EnquiryWithCourse::from).collect())
    }

    /// Count enquiries matching the admin filter.
    pub async fn count_admin(pool: &PgPool, filter: &EnquiryListFilter) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM enquiry
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            "#,
        )
        .bind(&filter.status)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_one(pool)
        .await
        .context("failed to count enquiries")?;

        Ok(total)
    }

    /// Fetch one enquiry with its course reference.
    pub async fn find_with_course(
        pool: &PgPool,
        id: &ObjectId,
    ) -> Result<Option<EnquiryWithCourse>> {
        let row = sqlx::query_as::<_, EnquiryJoinRow>(
            r#"
            SELECT e.id, e.mobile, e.name, e.email, e.description, e.course_id,
                   e.status, e.notes, e.created_at, e.updated_at,
                   c.name AS course_name, c.slug AS course_slug
            FROM enquiry e
            LEFT JOIN course c ON c.id = e.course_id
            WHERE e.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch enquiry")?;

        Ok(row.map(EnquiryWithCourse::from))
    }

    /// Admin update: status (already validated) and/or notes.
    pub async fn update_admin(
        pool: &PgPool,
        id: &ObjectId,
        status: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Option<EnquiryWithCourse>> {
        let updated = sqlx::query(
            r#"
            UPDATE enquiry
            SET status = COALESCE($1, status),
                notes = COALESCE($2, notes),
                updated_at = now()
            WHERE id = $3
            "#,
        )
        .bind(status)
        .bind(notes)
        .bind(id)
        .execute(pool)
        .await
        .context("failed to update enquiry")?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_with_course(pool, id).await
    }
}

impl CounsellingEnquiry {
    /// Create a counselling enquiry with status "new".
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        name: &str,
        email: &str,
        phone: &str,
        course_interest: Option<&str>,
        current_status: Option<&str>,
        message: Option<&str>,
        college_id: Option<&ObjectId>,
        source: &str,
    ) -> Result<Self> {
        let enquiry = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO counselling_enquiry
                (id, name, email, phone, course_interest, current_status, message,
                 college_id, status, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'new', $9)
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(course_interest)
        .bind(current_status)
        .bind(message)
        .bind(college_id)
        .bind(source)
        .fetch_one(pool)
        .await
        .context("failed to create counselling enquiry")?;

        Ok(enquiry)
    }
}

impl CollegeApplication {
    /// Create a college application with status "submitted".
    pub async fn create(
        pool: &PgPool,
        college_id: &ObjectId,
        email: &str,
        phone: &str,
        name: Option<&str>,
    ) -> Result<Self> {
        let application = sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO college_application (id, college_id, email, phone, name, status)
            VALUES ($1, $2, $3, $4, $5, 'submitted')
            RETURNING *
            "#,
        )
        .bind(ObjectId::generate())
        .bind(college_id)
        .bind(email)
        .bind(phone)
        .bind(name)
        .fetch_one(pool)
        .await
        .context("failed to create college application")?;

        Ok(application)
    }
}
