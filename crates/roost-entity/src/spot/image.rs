//! Spot image model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An image attached to a spot listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpotImage {
    /// Unique image identifier.
    pub id: Uuid,
    /// The spot this image belongs to.
    pub spot_id: Uuid,
    /// Image URL.
    pub url: String,
    /// Whether this image is the listing thumbnail.
    pub preview: bool,
    /// When the image was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to attach an image to a spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpotImage {
    pub spot_id: Uuid,
    pub url: String,
    pub preview: bool,
}
