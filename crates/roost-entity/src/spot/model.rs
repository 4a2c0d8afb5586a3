//! Spot entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A bookable listing owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Spot {
    /// Unique spot identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Listing name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Price per night.
    pub price: f64,
    /// When the spot was created.
    pub created_at: DateTime<Utc>,
    /// When the spot was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A spot row joined with its review and preview-image aggregates, as
/// returned by list queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpotSummary {
    /// Unique spot identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Listing name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Price per night.
    pub price: f64,
    /// When the spot was created.
    pub created_at: DateTime<Utc>,
    /// When the spot was last updated.
    pub updated_at: DateTime<Utc>,
    /// Mean star rating across reviews (None when unreviewed).
    pub avg_rating: Option<f64>,
    /// URL of the preview image, if one is set.
    pub preview_image: Option<String>,
}

/// Review aggregates for a single spot's detail view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SpotRatingStats {
    /// Number of reviews for the spot.
    pub num_reviews: i64,
    /// Mean star rating (None when unreviewed).
    pub avg_star_rating: Option<f64>,
}

/// Data required to create a new spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpot {
    /// The owning user.
    pub owner_id: Uuid,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Country.
    pub country: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Listing name.
    pub name: String,
    /// Listing description.
    pub description: String,
    /// Price per night.
    pub price: f64,
}

/// Partial update for an existing spot. `None` fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSpot {
    /// The spot to update.
    pub id: Uuid,
    /// New street address.
    pub address: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state.
    pub state: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New latitude.
    pub lat: Option<f64>,
    /// New longitude.
    pub lng: Option<f64>,
    /// New listing name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New price per night.
    pub price: Option<f64>,
}
