//! Review image model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum number of images attachable to one review.
pub const MAX_IMAGES_PER_REVIEW: i64 = 10;

/// An image attached to a review.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewImage {
    /// Unique image identifier.
    pub id: Uuid,
    /// The review this image belongs to.
    pub review_id: Uuid,
    /// Image URL.
    pub url: String,
    /// When the image was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to attach an image to a review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewImage {
    pub review_id: Uuid,
    pub url: String,
}
