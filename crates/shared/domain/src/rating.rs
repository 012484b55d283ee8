//! Rating domain entity and the per-store rating summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::error::{DomainError, DomainResult};

/// User-facing message for an out-of-range rating
pub const RATING_RANGE_MESSAGE: &str = "Rating must be between 1 and 5";

/// A single user's rating of a single store.
///
/// At most one rating exists per `(user_id, store_id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub id: Uuid,
    pub rating: i32,
    pub user_id: Uuid,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rating {
    /// Create a rating after checking the value range
    pub fn new(rating: i32, user_id: Uuid, store_id: Uuid) -> DomainResult<Self> {
        Self::ensure_valid_value(rating)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            rating,
            user_id,
            store_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn ensure_valid_value(rating: i32) -> DomainResult<()> {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            Ok(())
        } else {
            Err(DomainError::validation(RATING_RANGE_MESSAGE))
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Change the value, keeping the same row
    pub fn update_value(&mut self, rating: i32) -> DomainResult<()> {
        Self::ensure_valid_value(rating)?;
        self.rating = rating;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Aggregate of all ratings for one store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RatingSummary {
    /// Arithmetic mean, `None` when the store has no ratings
    pub average_rating: Option<f64>,
    pub rating_count: u64,
}

impl RatingSummary {
    /// Build from a SQL aggregate row
    pub fn new(average_rating: Option<f64>, rating_count: u64) -> Self {
        if rating_count == 0 {
            return Self::default();
        }
        Self {
            average_rating,
            rating_count,
        }
    }

    pub fn from_ratings(values: &[i32]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let sum: i64 = values.iter().map(|&v| i64::from(v)).sum();
        let count = values.len() as u64;
        Self {
            average_rating: Some(sum as f64 / count as f64),
            rating_count: count,
        }
    }
}
