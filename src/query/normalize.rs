//! Listing parameter parsing.
//!
//! Pure, lenient parsing: malformed input degrades to a safe default rather
//! than erroring. Strict id-shape validation is a separate gate in the
//! route, applied before any of this runs feeds a query.

use serde::Deserialize;

/// Default page size for public listings.
pub const DEFAULT_LIMIT: i64 = 12;

/// Maximum page size for public listings.
pub const MAX_LIMIT: i64 = 50;

/// Raw query string for `GET /api/colleges`, everything optional and untyped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListingQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub category: Option<String>,
    pub stream: Option<String>,
    pub state: Option<String>,
    pub state_id: Option<String>,
    pub city: Option<String>,
    pub city_id: Option<String>,
    pub course_id: Option<String>,
    pub search: Option<String>,
    pub verified: Option<String>,
}

/// Parse a page number: integer >= 1, anything else becomes 1.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Parse a page size: default 12, numeric values clamped to [1, 50],
/// non-numeric input falls back to the default.
pub fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(DEFAULT_LIMIT, |l| l.clamp(1, MAX_LIMIT))
}

/// Parse the tri-state verified flag: only the literal strings "true" and
/// "false" are recognized, everything else is unset.
pub fn parse_verified(raw: Option<&str>) -> Option<bool> {
    match raw.map(str::trim) {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    }
}

/// Trim the search text; empty means "no search".
pub fn parse_search(raw: Option<&str>) -> Option<String> {
    let trimmed = raw.unwrap_or("").trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("2.5")), 1);
    }

    #[test]
    fn page_accepts_positive_integers() {
        assert_eq!(parse_page(Some("1")), 1);
        assert_eq!(parse_page(Some(" 7 ")), 7);
        assert_eq!(parse_page(Some("100")), 100);
    }

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(parse_limit(None), 12);
        assert_eq!(parse_limit(Some("abc")), 12);
        assert_eq!(parse_limit(Some("0")), 1);
        assert_eq!(parse_limit(Some("-5")), 1);
        assert_eq!(parse_limit(Some("50")), 50);
        assert_eq!(parse_limit(Some("51")), 50);
        assert_eq!(parse_limit(Some("999")), 50);
        assert_eq!(parse_limit(Some("25")), 25);
    }

    #[test]
    fn verified_parses_literal_strings_only() {
        assert_eq!(parse_verified(Some("true")), Some(true));
        assert_eq!(parse_verified(Some("false")), Some(false));
        assert_eq!(parse_verified(Some("TRUE")), None);
        assert_eq!(parse_verified(Some("1")), None);
        assert_eq!(parse_verified(Some("")), None);
        assert_eq!(parse_verified(None), None);
    }

    #[test]
    fn search_trims_and_drops_empty() {
        assert_eq!(parse_search(Some("  Delhi  ")), Some("Delhi".to_string()));
        assert_eq!(parse_search(Some("   ")), None);
        assert_eq!(parse_search(None), None);
    }
}
