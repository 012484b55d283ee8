//! Query-string parameters for list endpoints.
//!
//! Filtering and sorting happen in memory after the rows are loaded.

use std::cmp::Ordering;

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    Address,
    Role,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StoreSortField {
    #[default]
    Name,
    Email,
    Address,
    Rating,
    CreatedAt,
}

/// Filters for `GET /admin/users`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the email
    pub email: Option<String>,
    /// Case-insensitive substring of the address
    pub address: Option<String>,
    /// Exact role (USER, ADMIN, STORE_OWNER)
    pub role: Option<String>,
    pub sort_by: Option<UserSortField>,
    pub order: Option<SortOrder>,
}

/// Filters for store lists
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreListQuery {
    /// Matches the store name or address (case-insensitive)
    pub search: Option<String>,
    /// Case-insensitive substring of the store name
    pub name: Option<String>,
    /// Case-insensitive substring of the owner's email
    pub email: Option<String>,
    /// Case-insensitive substring of the store address
    pub address: Option<String>,
    pub sort_by: Option<StoreSortField>,
    pub order: Option<SortOrder>,
}

/// True when `filter` is absent or blank, or `value` contains it ignoring case.
pub fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter.map(str::trim) {
        None | Some("") => true,
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
    }
}
