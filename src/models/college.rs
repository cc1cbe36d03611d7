//! College model and CRUD operations.
//!
//! Colleges are the central catalog records. Each carries its location three
//! ways at once: state/city reference ids (source of truth), denormalized
//! display names cached at write time, and a combined `location_display`
//! string. The `courses` name array is likewise derived state: whenever the
//! richer `course_fees` structure is supplied it is authoritative and the
//! name array is regenerated from it.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use sqlx::types::Json;

use super::object_id::ObjectId;
use crate::services::slug::slugify;

/// Fixed closed set of institution categories.
pub const COLLEGE_CATEGORIES: [&str; 16] = [
    "Engineering",
    "MBA",
    "Medical",
    "Law",
    "Design",
    "Commerce",
    "Pharmacy",
    "Architecture",
    "Data Science",
    "MCA",
    "Private",
    "Autonomous",
    "Government",
    "Deemed",
    "Aided",
    "Other",
];

/// Check membership in the fixed category set (exact match).
pub fn is_college_category(raw: &str) -> bool {
    COLLEGE_CATEGORIES.contains(&raw)
}

/// Resolve a stream slug (e.g. "data-science") to its category name.
pub fn category_for_stream_slug(stream: &str) -> Option<&'static str> {
    let wanted = stream.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    COLLEGE_CATEGORIES
        .iter()
        .find(|cat| slugify(cat) == wanted)
        .copied()
}

/// Billing period for a fee amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeePeriod {
    Year,
    Semester,
}

impl FeePeriod {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "year" => Some(Self::Year),
            "semester" => Some(Self::Semester),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Semester => "semester",
        }
    }

    /// Display suffix used in formatted fee strings.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Year => "/yr",
            Self::Semester => "/sem",
        }
    }
}

/// Per-course fee entry, stored as JSONB on the college record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFee {
    pub course_name: String,

    /// Free-text fee label, preferred over the numeric amount for display.
    #[serde(default)]
    pub fee: Option<String>,

    #[serde(default)]
    pub fee_amount: Option<i64>,

    #[serde(default)]
    pub fee_period: Option<FeePeriod>,
}

/// College record.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct College {
    /// Internal generated identifier. The public identifier is the slug.
    pub id: ObjectId,

    /// URL-safe unique identifier, assigned at creation and never changed.
    pub slug: String,

    pub name: String,
    pub short_name: Option<String>,

    pub country_id: ObjectId,
    pub state_id: ObjectId,
    pub city_id: ObjectId,

    /// Display names cached from the referenced state/city at write time.
    pub state_name: String,
    pub city_name: String,

    pub address: Option<String>,
    pub pin_code: Option<String>,

    /// Combined "{cityName}, {stateName}" display string.
    pub location_display: String,

    pub category: String,

    /// Course names, denormalized for search and filtering.
    pub courses: Vec<String>,

    #[sqlx(json)]
    pub course_fees: Vec<CourseFee>,

    pub badge: Option<String>,

    /// Flat free-text fee label for overall display.
    pub fee: Option<String>,
    pub fee_amount: Option<i64>,
    pub fee_period: Option<String>,

    pub rating: Option<f64>,
    pub nirf_rank: Option<i32>,
    pub placement_rate: Option<f64>,
    pub avg_package: Option<String>,

    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub eligibility: Option<String>,
    pub facilities: Vec<String>,

    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub gallery_urls: Vec<String>,

    /// Controls public visibility; public reads never return inactive colleges.
    pub is_active: bool,

    /// Independent verification badge.
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lenient per-course fee input, normalized before persistence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFeeInput {
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub fee_amount: Option<i64>,
    #[serde(default)]
    pub fee_period: Option<String>,
}

/// Admin create/update payload. All fields optional; create enforces its
/// required subset in the route. A `slug` key in the payload is ignored,
/// the slug is immutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeInput {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub country_id: Option<ObjectId>,
    pub state_id: Option<ObjectId>,
    pub city_id: Option<ObjectId>,
    pub state_name: Option<String>,
    pub city_name: Option<String>,
    pub address: Option<String>,
    pub pin_code: Option<String>,
    pub location_display: Option<String>,
    pub category: Option<String>,
    pub courses: Option<Vec<String>>,
    pub course_fees: Option<Vec<CourseFeeInput>>,
    pub badge: Option<String>,
    pub fee: Option<String>,
    pub fee_amount: Option<i64>,
    pub fee_period: Option<String>,
    pub rating: Option<f64>,
    pub nirf_rank: Option<i32>,
    pub placement_rate: Option<f64>,
    pub avg_package: Option<String>,
    pub description: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub eligibility: Option<String>,
    pub facilities: Option<Vec<String>>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub gallery_urls: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
}

/// Normalize raw per-course fee entries: trim names, drop entries without a
/// course name, validate the period enum.
pub fn normalize_course_fees(raw: Vec<CourseFeeInput>) -> Vec<CourseFee> {
    raw.into_iter()
        .filter_map(|entry| {
            let course_name = entry.course_name.as_deref().unwrap_or("").trim().to_string();
            if course_name.is_empty() {
                return None;
            }
            Some(CourseFee {
                course_name,
                fee: entry.fee,
                fee_amount: entry.fee_amount,
                fee_period: entry.fee_period.as_deref().and_then(FeePeriod::parse),
            })
        })
        .collect()
}

impl College {
    /// Find a college by internal id.
    pub async fn find_by_id(pool: &PgPool, id: &ObjectId) -> Result<Option<Self>> {
        let college = sqlx::query_as::<_, Self>("SELECT * FROM college WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .context("failed to fetch college by id")?;

        Ok(college)
    }

    /// Find an active college by its public slug.
    pub async fn find_by_slug_active(pool: &PgPool, slug: &str) -> Result<Option<Self>> {
        let college = sqlx::query_as::<_, Self>(
            "SELECT * FROM college WHERE slug = $1 AND is_active = TRUE",
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
        .context("failed to fetch college by slug")?;

        Ok(college)
    }

    /// Check whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM college WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await
                .context("failed to check slug existence")?;

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

    /// Insert a fully-populated college record.
    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO college (
                id, slug, name, short_name, country_id, state_id, city_id,
                state_name, city_name, address, pin_code, location_display,
                category, courses, course_fees, badge, fee, fee_amount,
                fee_period, rating, nirf_rank, placement_rate, avg_package,
                description, highlights, eligibility, facilities, website,
                phone, email, logo_url, cover_image_url, gallery_urls,
                is_active, is_verified, created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25, $26,
                $27, $28, $29, $30, $31, $32, $33, $34, $35, $36, $37
            )
            "#,
        )
        .bind(&self.id)
        .bind(&self.slug)
        .bind(&self.name)
        .bind(&self.short_name)
        .bind(&self.country_id)
        .bind(&self.state_id)
        .bind(&self.city_id)
        .bind(&self.state_name)
        .bind(&self.city_name)
        .bind(&self.address)
        .bind(&self.pin_code)
        .bind(&self.location_display)
        .bind(&self.category)
        .bind(&self.courses)
        .bind(Json(&self.course_fees))
        .bind(&self.badge)
        .bind(&self.fee)
        .bind(self.fee_amount)
        .bind(&self.fee_period)
        .bind(self.rating)
        .bind(self.nirf_rank)
        .bind(self.placement_rate)
        .bind(&self.avg_package)
        .bind(&self.description)
        .bind(&self.highlights)
        .bind(&self.eligibility)
        .bind(&self.facilities)
        .bind(&self.website)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.logo_url)
        .bind(&self.cover_image_url)
        .bind(&self.gallery_urls)
        .bind(self.is_active)
        .bind(self.is_verified)
        .bind(self.created_at)
        .bind(self.updated_at)
        .execute(pool)
        .await
        .context("failed to insert college")?;

        Ok(())
    }

    /// Persist every mutable column of an updated record (slug excluded).
    pub async fn replace(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE college SET
                name = $1, short_name = $2, country_id = $3, state_id = $4,
                city_id = $5, state_name = $6, city_name = $7, address = $8,
                pin_code = $9, location_display = $10, category = $11,
                courses = $12, course_fees = $13, badge = $14, fee = $15,
                fee_amount = $16, fee_period = $17, rating = $18,
                nirf_rank = $19, placement_rate = $20, avg_package = $21,
                description = $22, highlights = $23, eligibility = $24,
                facilities = $25, website = $26, phone = $27, email = $28,
                logo_url = $29, cover_image_url = $30, gallery_urls = $31,
                is_active = $32, is_verified = $33, updated_at = $34
            WHERE id = $35
            "#,
        )
        .bind(&self.name)
        .bind(&self.short_name)
        .bind(&self.country_id)
        .bind(&self.state_id)
        .bind(&self.city_id)
        .bind(&self.state_name)
        .bind(&self.city_name)
        .bind(&self.address)
        .bind(&self.pin_code)
        .bind(&self.location_display)
        .bind(&self.category)
        .bind(&self.courses)
        .bind(Json(&self.course_fees))
        .bind(&self.badge)
        .bind(&self.fee)
        .bind(self.fee_amount)
        .bind(&self.fee_period)
        .bind(self.rating)
        .bind(self.nirf_rank)
        .bind(self.placement_rate)
        .bind(&self.avg_package)
        .bind(&self.description)
        .bind(&self.highlights)
        .bind(&self.eligibility)
        .bind(&self.facilities)
        .bind(&self.website)
        .bind(&self.phone)
        .bind(&self.email)
        .bind(&self.logo_url)
        .bind(&self.cover_image_url)
        .bind(&self.gallery_urls)
        .bind(self.is_active)
        .bind(self.is_verified)
        .bind(self.updated_at)
        .bind(&self.id)
        .execute(pool)
        .await
        .context("failed to update college")?;

        Ok(())
    }

    /// Flip the activation flag. Returns the updated record if it exists.
    pub async fn set_active(
        pool: &PgPool,
        id: &ObjectId,
        is_active: bool,
    ) -> Result<Option<Self>> {
        let college = sqlx::query_as::<_, Self>(
            "UPDATE college SET is_active = $1, updated_at = now() WHERE id = $2 RETURNING *",
        )
        .bind(is_active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to update college status")?;

        Ok(college)
    }

    /// Hard-delete a college. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: &ObjectId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM college WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .context("failed to delete college")?;

        Ok(result.rows_affected() > 0)
    }

    /// Admin listing: newest first, optional exact-match filters, inactive
    /// records included.
    pub async fn admin_list(
        pool: &PgPool,
        category: Option<&str>,
        state_id: Option<&str>,
        city_id: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>> {
        let colleges = sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM college
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR state_id = $2)
              AND ($3::text IS NULL OR city_id = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(category)
        .bind(state_id)
        .bind(city_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .context("failed to list colleges for admin")?;

        Ok(colleges)
    }

    /// Count colleges matching the admin listing filters.
    pub async fn admin_count(
        pool: &PgPool,
        category: Option<&str>,
        state_id: Option<&str>,
        city_id: Option<&str>,
    ) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM college
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR state_id = $2)
              AND ($3::text IS NULL OR city_id = $3)
            "#,
        )
        .bind(category)
        .bind(state_id)
        .bind(city_id)
        .fetch_one(pool)
        .await
        .context("failed to count colleges for admin")?;

        Ok(total)
    }

    /// Count active colleges per course name (exact name membership in the
    /// denormalized `courses` array).
    pub async fn count_by_course_name(pool: &PgPool) -> Result<HashMap<String, i64>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT course, COUNT(*)
            FROM college, unnest(college.courses) AS course
            WHERE college.is_active = TRUE
            GROUP BY course
            "#,
        )
        .fetch_all(pool)
        .await
        .context("failed to aggregate college counts per course")?;

        Ok(rows
            .into_iter()
            .filter_map(|(name, count)| {
                let name = name.trim().to_string();
                if name.is_empty() { None } else { Some((name, count)) }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_membership_is_exact() {
        assert!(is_college_category("Engineering"));
        assert!(is_college_category("Data Science"));
        assert!(!is_college_category("engineering"));
        assert!(!is_college_category("All"));
        assert!(!is_college_category(""));
    }

    #[test]
    fn stream_slug_resolves_to_category() {
        assert_eq!(category_for_stream_slug("engineering"), Some("Engineering"));
        assert_eq!(category_for_stream_slug("data-science"), Some("Data Science"));
        assert_eq!(category_for_stream_slug(" MBA "), Some("MBA"));
        assert_eq!(category_for_stream_slug("astrology"), None);
        assert_eq!(category_for_stream_slug(""), None);
    }

    #[test]
    fn fee_period_parses_strictly() {
        assert_eq!(FeePeriod::parse("year"), Some(FeePeriod::Year));
        assert_eq!(FeePeriod::parse("semester"), Some(FeePeriod::Semester));
        assert_eq!(FeePeriod::parse("Year"), None);
        assert_eq!(FeePeriod::parse("monthly"), None);
    }

    #[test]
    fn course_fee_normalization_drops_nameless_entries() {
        let fees = normalize_course_fees(vec![
            CourseFeeInput {
                course_name: Some("  MBA  ".to_string()),
                fee: None,
                fee_amount: Some(500_000),
                fee_period: Some("year".to_string()),
            },
            CourseFeeInput {
                course_name: Some("   ".to_string()),
                fee: Some("₹1L".to_string()),
                fee_amount: None,
                fee_period: None,
            },
            CourseFeeInput {
                course_name: None,
                fee: None,
                fee_amount: Some(1),
                fee_period: None,
            },
        ]);

        assert_eq!(fees.len(), 1);
        assert_eq!(fees[0].course_name, "MBA");
        assert_eq!(fees[0].fee_amount, Some(500_000));
        assert_eq!(fees[0].fee_period, Some(FeePeriod::Year));
    }

    #[test]
    fn course_fee_normalization_rejects_unknown_period() {
        let fees = normalize_course_fees(vec![CourseFeeInput {
            course_name: Some("B.Tech".to_string()),
            fee: None,
            fee_amount: Some(90_000),
            fee_period: Some("quarterly".to_string()),
        }]);

        assert_eq!(fees[0].fee_period, None);
    }

    #[test]
    fn course_fee_json_round_trips_with_camel_case() {
        let fee = CourseFee {
            course_name: "MBA".to_string(),
            fee: None,
            fee_amount: Some(500_000),
            fee_period: Some(FeePeriod::Year),
        };
        let json = serde_json::to_value(&fee).unwrap();
        assert_eq!(json["courseName"], "MBA");
        assert_eq!(json["feeAmount"], 500_000);
        assert_eq!(json["feePeriod"], "year");
    }
}
