#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Listing pipeline integration tests.
//!
//! Exercises the full parameter-to-SQL-to-projection path without a
//! database: normalization, filter composition, sort resolution, rendered
//! SQL, and view-model projection.

use campusfind::models::{College, CourseFee, FeePeriod};
use campusfind::query::filter::{CollegeFilter, LocationFilter};
use campusfind::query::normalize::{parse_limit, parse_page, parse_search, parse_verified};
use campusfind::query::project::{CollegeDetail, CollegeListItem, format_fee_display};
use campusfind::query::sort::SortOption;
use campusfind::query::CollegeQueryBuilder;
use chrono::TimeZone;

fn college(slug: &str) -> College {
    College {
        id: "507f1f77bcf86cd799439011".parse().unwrap(),
        slug: slug.to_string(),
        name: "COEP Technological University".to_string(),
        short_name: Some("COEP".to_string()),
        country_id: "507f1f77bcf86cd799439012".parse().unwrap(),
        state_id: "507f1f77bcf86cd799439013".parse().unwrap(),
        city_id: "507f1f77bcf86cd799439014".parse().unwrap(),
        state_name: "Maharashtra".to_string(),
        city_name: "Pune".to_string(),
        address: None,
        pin_code: None,
        location_display: String::new(),
        category: "Engineering".to_string(),
        courses: vec!["MBA".to_string()],
        course_fees: vec![CourseFee {
            course_name: "MBA".to_string(),
            fee: None,
            fee_amount: Some(500_000),
            fee_period: Some(FeePeriod::Year),
        }],
        badge: None,
        fee: None,
        fee_amount: None,
        fee_period: None,
        rating: None,
        nirf_rank: None,
        placement_rate: None,
        avg_package: None,
        description: None,
        highlights: vec![],
        eligibility: None,
        facilities: vec![],
        website: None,
        phone: None,
        email: None,
        logo_url: None,
        cover_image_url: None,
        gallery_urls: vec![],
        is_active: true,
        is_verified: false,
        created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        updated_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
    }
}

// -------------------------------------------------------------------------
// Normalization
// -------------------------------------------------------------------------

#[test]
fn page_and_limit_bounds() {
    assert_eq!(parse_page(Some("-1")), 1);
    assert_eq!(parse_page(Some("three")), 1);
    assert_eq!(parse_limit(None), 12);
    assert_eq!(parse_limit(Some("0")), 1);
    assert_eq!(parse_limit(Some("500")), 50);
}

#[test]
fn verified_is_tristate() {
    assert_eq!(parse_verified(Some("true")), Some(true));
    assert_eq!(parse_verified(Some("false")), Some(false));
    assert_eq!(parse_verified(Some("yes")), None);
}

// -------------------------------------------------------------------------
// Filter + sort + rendered SQL
// -------------------------------------------------------------------------

#[test]
fn multi_token_search_ands_independent_or_groups() {
    let filter = CollegeFilter {
        search_tokens: vec!["Delhi".to_string(), "Engineering".to_string()],
        ..Default::default()
    };
    let builder = CollegeQueryBuilder::new(filter, SortOption::Relevance.resolve(true));
    let sql = builder.build_page(1, 12);

    // Relevance under search degrades to recency ordering.
    assert!(sql.contains(r#"ORDER BY "college"."created_at" DESC"#));
    // One OR group per token, each spanning all eight searchable fields.
    assert_eq!(sql.matches("ILIKE '%Delhi%'").count(), 8);
    assert_eq!(sql.matches("ILIKE '%Engineering%'").count(), 8);
}

#[test]
fn relevance_without_search_is_alphabetical() {
    let builder = CollegeQueryBuilder::new(
        CollegeFilter::default(),
        SortOption::Relevance.resolve(false),
    );
    let sql = builder.build_page(1, 12);
    assert!(sql.contains(r#"ORDER BY "college"."name" ASC"#));
}

#[test]
fn state_id_clause_excludes_name_matching() {
    let filter = CollegeFilter {
        state: Some(LocationFilter::Id(
            "507f1f77bcf86cd799439013".parse().unwrap(),
        )),
        ..Default::default()
    };
    let builder = CollegeQueryBuilder::new(filter, SortOption::NameAsc.resolve(false));
    let sql = builder.build_page(1, 12);

    assert!(sql.contains(r#""college"."state_id" = '507f1f77bcf86cd799439013'"#));
    assert!(!sql.contains("state_name"));
}

#[test]
fn count_and_page_share_identical_filters() {
    let filter = CollegeFilter {
        category: Some("Engineering".to_string()),
        verified: Some(true),
        search_tokens: vec!["pune".to_string()],
        ..Default::default()
    };
    let builder = CollegeQueryBuilder::new(filter, SortOption::Newest.resolve(false));
    let page_sql = builder.build_page(2, 10);
    let count_sql = builder.build_count();

    for clause in [
        r#""college"."is_active" = TRUE"#,
        r#""college"."category" = 'Engineering'"#,
        r#""college"."is_verified" = TRUE"#,
        "ILIKE '%pune%'",
    ] {
        assert!(page_sql.contains(clause), "page query missing {clause}");
        assert!(count_sql.contains(clause), "count query missing {clause}");
    }
    assert!(page_sql.contains("OFFSET 10"));
    assert!(!count_sql.contains("OFFSET"));
}

// -------------------------------------------------------------------------
// Projection
// -------------------------------------------------------------------------

#[test]
fn course_fees_drive_list_fee_and_courses() {
    let item = CollegeListItem::from(college("coep"));

    assert_eq!(item.id, "coep");
    assert_eq!(item.courses, vec!["MBA".to_string()]);
    assert_eq!(item.fee, "₹5L/yr");
    assert_eq!(item.course_fees.len(), 1);
    assert_eq!(item.course_fees[0].course, "MBA");
    assert_eq!(item.course_fees[0].fee, "₹5L/yr");
}

#[test]
fn location_derives_from_cached_names() {
    let item = CollegeListItem::from(college("coep"));
    assert_eq!(item.location, "Pune, Maharashtra");
}

#[test]
fn detail_and_list_agree_on_shared_fields() {
    let item = CollegeListItem::from(college("coep"));
    let detail = CollegeDetail::from(college("coep"));

    assert_eq!(item.id, detail.id);
    assert_eq!(item.location, detail.location);
    assert_eq!(item.courses, detail.courses);
    assert_eq!(item.course_fees[0].fee, detail.course_fees[0].fee);
}

#[test]
fn fee_formatting_fixed_points() {
    assert_eq!(
        format_fee_display(Some(250_000), Some(FeePeriod::Year)),
        "₹2.5L/yr"
    );
    assert_eq!(
        format_fee_display(Some(45_000), Some(FeePeriod::Semester)),
        "₹45,000/sem"
    );
    assert_eq!(format_fee_display(None, None), "");
}

#[test]
fn list_serialization_uses_camel_case_and_slug_id() {
    let json = serde_json::to_value(CollegeListItem::from(college("coep"))).unwrap();

    assert_eq!(json["id"], "coep");
    assert_eq!(json["shortName"], "COEP");
    assert_eq!(json["isVerified"], false);
    assert_eq!(json["courseFees"][0]["course"], "MBA");
    assert!(json.get("slug").is_none());
    assert!(json.get("isActive").is_none());
}
