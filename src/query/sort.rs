//! Sort option resolution.

use sea_query::Order;

use super::Colleges;

/// Recognized sort options for the public college listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    #[default]
    NameAsc,
    NameDesc,
    FeeAsc,
    FeeDesc,
    RatingDesc,
    NirfAsc,
    Newest,
    Relevance,
}

impl SortOption {
    /// Parse a raw sort parameter; unrecognized values fall back to the
    /// default rather than erroring.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("name_asc") => Self::NameAsc,
            Some("name_desc") => Self::NameDesc,
            Some("fee_asc") => Self::FeeAsc,
            Some("fee_desc") => Self::FeeDesc,
            Some("rating_desc") => Self::RatingDesc,
            Some("nirf_asc") => Self::NirfAsc,
            Some("newest") => Self::Newest,
            Some("relevance") => Self::Relevance,
            _ => Self::default(),
        }
    }

    /// Resolve to a concrete column and direction. "relevance" has no real
    /// scoring: it degrades to recency when a search is active and to
    /// alphabetical order otherwise.
    pub fn resolve(self, has_search: bool) -> (Colleges, Order) {
        match self {
            Self::NameAsc => (Colleges::Name, Order::Asc),
            Self::NameDesc => (Colleges::Name, Order::Desc),
            Self::FeeAsc => (Colleges::FeeAmount, Order::Asc),
            Self::FeeDesc => (Colleges::FeeAmount, Order::Desc),
            Self::RatingDesc => (Colleges::Rating, Order::Desc),
            Self::NirfAsc => (Colleges::NirfRank, Order::Asc),
            Self::Newest => (Colleges::CreatedAt, Order::Desc),
            Self::Relevance => {
                if has_search {
                    (Colleges::CreatedAt, Order::Desc)
                } else {
                    (Colleges::Name, Order::Asc)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_options_parse() {
        assert_eq!(SortOption::parse(Some("name_desc")), SortOption::NameDesc);
        assert_eq!(SortOption::parse(Some("fee_asc")), SortOption::FeeAsc);
        assert_eq!(SortOption::parse(Some("newest")), SortOption::Newest);
        assert_eq!(SortOption::parse(Some("relevance")), SortOption::Relevance);
    }

    #[test]
    fn unknown_options_fall_back_to_default() {
        assert_eq!(SortOption::parse(None), SortOption::NameAsc);
        assert_eq!(SortOption::parse(Some("")), SortOption::NameAsc);
        assert_eq!(SortOption::parse(Some("popularity")), SortOption::NameAsc);
        assert_eq!(SortOption::parse(Some("NAME_ASC")), SortOption::NameAsc);
    }

    #[test]
    fn relevance_depends_on_search() {
        let (col, order) = SortOption::Relevance.resolve(true);
        assert!(matches!(col, Colleges::CreatedAt));
        assert_eq!(order, Order::Desc);

        let (col, order) = SortOption::Relevance.resolve(false);
        assert!(matches!(col, Colleges::Name));
        assert_eq!(order, Order::Asc);
    }

    #[test]
    fn fixed_options_resolve_to_column_and_direction() {
        assert!(matches!(
            SortOption::NirfAsc.resolve(false),
            (Colleges::NirfRank, Order::Asc)
        ));
        assert!(matches!(
            SortOption::RatingDesc.resolve(true),
            (Colleges::Rating, Order::Desc)
        ));
    }
}
