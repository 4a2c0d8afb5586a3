//! Review entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lowest accepted star rating.
pub const MIN_STARS: i32 = 1;
/// Highest accepted star rating.
pub const MAX_STARS: i32 = 5;

/// A user's review of a spot. One review per user per spot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// The reviewed spot.
    pub spot_id: Uuid,
    /// The reviewing user.
    pub user_id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating, 1 through 5.
    pub stars: i32,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    /// The reviewed spot.
    pub spot_id: Uuid,
    /// The reviewing user.
    pub user_id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating, 1 through 5.
    pub stars: i32,
}

/// Partial update for an existing review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReview {
    /// The review to update.
    pub id: Uuid,
    /// New review text.
    pub review: Option<String>,
    /// New star rating.
    pub stars: Option<i32>,
}

/// A review joined with a summary of the reviewed spot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewWithSpot {
    /// Unique review identifier.
    pub id: Uuid,
    /// The reviewed spot.
    pub spot_id: Uuid,
    /// The reviewing user.
    pub user_id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating.
    pub stars: i32,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
    /// Spot listing name.
    pub spot_name: String,
    /// Spot city.
    pub spot_city: String,
    /// Spot state.
    pub spot_state: String,
    /// Spot country.
    pub spot_country: String,
    /// Spot price per night.
    pub spot_price: f64,
}

/// A review joined with the reviewer's name, for a spot's review list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewWithUser {
    /// Unique review identifier.
    pub id: Uuid,
    /// The reviewed spot.
    pub spot_id: Uuid,
    /// The reviewing user.
    pub user_id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating.
    pub stars: i32,
    /// When the review was created.
    pub created_at: DateTime<Utc>,
    /// When the review was last updated.
    pub updated_at: DateTime<Utc>,
    /// Reviewer given name.
    pub reviewer_first_name: String,
    /// Reviewer family name.
    pub reviewer_last_name: String,
}
