//! College listing query pipeline.
//!
//! Turns loosely-typed listing parameters into a validated, filtered,
//! sorted, paginated SQL query and reshapes rows into the two public view
//! models. Stages: [`normalize`] parses raw parameters, [`filter`] composes
//! the WHERE condition, [`sort`] resolves the ordering, [`builder`] renders
//! the page and count SQL, [`project`] maps rows to response shapes.

pub mod builder;
pub mod filter;
pub mod normalize;
pub mod project;
pub mod sort;

use sea_query::Iden;

pub use builder::CollegeQueryBuilder;
pub use filter::{CollegeFilter, LocationFilter};
pub use normalize::{RawListingQuery, parse_limit, parse_page, parse_search, parse_verified};
pub use project::{CollegeDetail, CollegeListItem, CourseFeeView, format_fee_display};
pub use sort::SortOption;

/// College table and column identifiers for query building.
#[derive(Debug, Clone, Copy, Iden)]
pub enum Colleges {
    #[iden = "college"]
    Table,
    Id,
    Slug,
    Name,
    ShortName,
    StateId,
    CityId,
    StateName,
    CityName,
    LocationDisplay,
    Category,
    Courses,
    Badge,
    Fee,
    FeeAmount,
    Rating,
    NirfRank,
    Description,
    IsActive,
    IsVerified,
    CreatedAt,
}
