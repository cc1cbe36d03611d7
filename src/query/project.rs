//! Result projection: stored college rows to public view models.
//!
//! Two shapes from the same row: a compact list item for paginated search
//! results and a full detail payload. Both are pure mappings. The public
//! identifier in both is the slug, never the internal id.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{College, CourseFee, FeePeriod, ObjectId};
use crate::services::location::display_for;

/// Public `{course, fee}` pair derived from a stored fee entry.
#[derive(Debug, Clone, Serialize)]
pub struct CourseFeeView {
    pub course: String,
    pub fee: String,
}

/// Compact college card for paginated listing responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeListItem {
    /// The slug; public responses never expose the internal id.
    pub id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub location: String,
    pub state: String,
    pub city: String,
    pub state_id: ObjectId,
    pub city_id: ObjectId,
    pub category: String,
    pub courses: Vec<String>,
    pub course_fees: Vec<CourseFeeView>,
    /// Resolved display fee; empty string when nothing is known.
    pub fee: String,
    pub fee_amount: Option<i64>,
    pub fee_period: Option<String>,
    pub badge: String,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub is_verified: bool,
}

/// Full college payload for the detail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollegeDetail {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub short_name: Option<String>,
    pub location: String,
    pub state: String,
    pub city: String,
    pub state_id: ObjectId,
    pub city_id: ObjectId,
    pub category: String,
    pub courses: Vec<String>,
    pub course_fees: Vec<CourseFeeView>,
    /// The raw flat fee label; the formatted derivation is list-item only.
    pub fee: String,
    pub fee_amount: Option<i64>,
    pub fee_period: Option<String>,
    pub badge: Option<String>,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub eligibility: Option<String>,
    pub facilities: Vec<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub pin_code: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub gallery_urls: Vec<String>,
    pub rating: Option<f64>,
    pub nirf_rank: Option<i32>,
    pub placement_rate: Option<f64>,
    pub avg_package: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Format a numeric fee for display: amounts of a lakh or more render as
/// "₹2.5L/yr" with a trailing ".0" stripped, smaller amounts with Indian
/// digit grouping as "₹45,000/sem". Unknown amount renders as "".
pub fn format_fee_display(amount: Option<i64>, period: Option<FeePeriod>) -> String {
    let Some(amount) = amount else {
        return String::new();
    };
    let suffix = period.unwrap_or(FeePeriod::Year).suffix();
    if amount >= 100_000 {
        let lakhs = format!("{:.1}", amount as f64 / 100_000.0);
        let lakhs = lakhs.strip_suffix(".0").unwrap_or(&lakhs);
        format!("₹{lakhs}L{suffix}")
    } else {
        format!("₹{}{suffix}", group_inr(amount))
    }
}

/// Indian digit grouping: last three digits, then groups of two.
fn group_inr(amount: i64) -> String {
    let (sign, digits) = if amount < 0 {
        ("-", amount.unsigned_abs().to_string())
    } else {
        ("", amount.to_string())
    };
    if digits.len() <= 3 {
        return format!("{sign}{digits}");
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{sign}{},{tail}", groups.join(","))
}

fn period_of(raw: Option<&str>) -> Option<FeePeriod> {
    raw.and_then(FeePeriod::parse)
}

/// Map stored fee entries to `{course, fee}` pairs, preferring each entry's
/// own label over its formatted amount and dropping nameless entries.
fn course_fee_views(fees: &[CourseFee]) -> Vec<CourseFeeView> {
    fees.iter()
        .filter_map(|cf| {
            let course = cf.course_name.trim();
            if course.is_empty() {
                return None;
            }
            let label = cf.fee.as_deref().map(str::trim).unwrap_or("");
            let fee = if label.is_empty() {
                format_fee_display(cf.fee_amount, cf.fee_period)
            } else {
                label.to_string()
            };
            Some(CourseFeeView {
                course: course.to_string(),
                fee,
            })
        })
        .collect()
}

/// Resolve the list-item display fee: the flat label if non-empty, else the
/// formatted flat amount, else the first per-course entry (its label
/// preferred over its formatted amount).
fn resolve_list_fee(college: &College) -> String {
    let label = college.fee.as_deref().map(str::trim).unwrap_or("");
    if !label.is_empty() {
        return label.to_string();
    }
    if college.fee_amount.is_some() {
        return format_fee_display(college.fee_amount, period_of(college.fee_period.as_deref()));
    }
    if let Some(first) = college.course_fees.first() {
        let first_label = first.fee.as_deref().map(str::trim).unwrap_or("");
        if !first_label.is_empty() {
            return first_label.to_string();
        }
        return format_fee_display(first.fee_amount, first.fee_period);
    }
    String::new()
}

fn resolve_location(college: &College) -> String {
    let display = college.location_display.trim();
    if display.is_empty() {
        display_for(college.city_name.trim(), college.state_name.trim())
    } else {
        display.to_string()
    }
}

impl From<College> for CollegeListItem {
    fn from(college: College) -> Self {
        let location = resolve_location(&college);
        let fee = resolve_list_fee(&college);
        let course_fees = course_fee_views(&college.course_fees);

        Self {
            id: college.slug,
            name: college.name,
            short_name: college.short_name,
            location,
            state: college.state_name,
            city: college.city_name,
            state_id: college.state_id,
            city_id: college.city_id,
            category: college.category,
            courses: college.courses,
            course_fees,
            fee,
            fee_amount: college.fee_amount,
            fee_period: college.fee_period,
            badge: college.badge.unwrap_or_default(),
            description: college.description,
            logo_url: college.logo_url,
            cover_image_url: college.cover_image_url,
            is_verified: college.is_verified,
        }
    }
}

impl From<College> for CollegeDetail {
    fn from(college: College) -> Self {
        let location = resolve_location(&college);
        let course_fees = course_fee_views(&college.course_fees);

        Self {
            id: college.slug.clone(),
            slug: college.slug,
            name: college.name,
            short_name: college.short_name,
            location,
            state: college.state_name,
            city: college.city_name,
            state_id: college.state_id,
            city_id: college.city_id,
            category: college.category,
            courses: college.courses,
            course_fees,
            fee: college.fee.unwrap_or_default(),
            fee_amount: college.fee_amount,
            fee_period: college.fee_period,
            badge: college.badge,
            description: college.description,
            highlights: college.highlights,
            eligibility: college.eligibility,
            facilities: college.facilities,
            website: college.website,
            phone: college.phone,
            email: college.email,
            address: college.address,
            pin_code: college.pin_code,
            logo_url: college.logo_url,
            cover_image_url: college.cover_image_url,
            gallery_urls: college.gallery_urls,
            rating: college.rating,
            nirf_rank: college.nirf_rank,
            placement_rate: college.placement_rate,
            avg_package: college.avg_package,
            is_verified: college.is_verified,
            created_at: college.created_at,
            updated_at: college.updated_at,
        }
    }
}
