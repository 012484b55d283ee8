//! Shared types for responses and list queries.

mod query;
mod response;

pub use query::{matches_filter, SortOrder, StoreListQuery, StoreSortField, UserListQuery, UserSortField};
pub use response::{ApiResponse, Created, MessageResponse};
