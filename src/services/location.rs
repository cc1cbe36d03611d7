//! Write-time location materialization.
//!
//! College records cache their state and city names so listing filters and
//! free-text search never need a join. This resolves the cached names from
//! the referenced ids whenever a college is created or its location changes.

use anyhow::Result;
use sqlx::PgPool;

use crate::models::{City, ObjectId, State};

/// Names resolved from location ids, ready to cache on a college record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub state_name: String,
    pub city_name: String,
    pub location_display: String,
}

/// Resolve cached names for the given state and city ids. Unknown ids
/// resolve to empty names rather than an error.
pub async fn resolve_names(
    pool: &PgPool,
    state_id: Option<&ObjectId>,
    city_id: Option<&ObjectId>,
) -> Result<ResolvedLocation> {
    let (state, city) = tokio::try_join!(
        async {
            match state_id {
                Some(id) => State::find_by_id(pool, id).await,
                None => Ok(None),
            }
        },
        async {
            match city_id {
                Some(id) => City::find_by_id(pool, id).await,
                None => Ok(None),
            }
        },
    )?;

    let state_name = state.map(|s| s.name).unwrap_or_default();
    let city_name = city.map(|c| c.name).unwrap_or_default();
    let location_display = display_for(&city_name, &state_name);

    Ok(ResolvedLocation {
        state_name,
        city_name,
        location_display,
    })
}

/// "City, State" when both are known, otherwise whichever name exists.
pub fn display_for(city_name: &str, state_name: &str) -> String {
    match (city_name.is_empty(), state_name.is_empty()) {
        (false, false) => format!("{city_name}, {state_name}"),
        (false, true) => city_name.to_string(),
        (true, false) => state_name.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::display_for;

    #[test]
    fn both_names_join_with_comma() {
        assert_eq!(display_for("Pune", "Maharashtra"), "Pune, Maharashtra");
    }

    #[test]
    fn single_name_stands_alone() {
        assert_eq!(display_for("", "Karnataka"), "Karnataka");
        assert_eq!(display_for("Mysuru", ""), "Mysuru");
    }

    #[test]
    fn no_names_no_display() {
        assert_eq!(display_for("", ""), "");
    }
}
