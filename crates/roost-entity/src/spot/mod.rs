//! Spot (bookable listing) entity.

pub mod image;
pub mod model;

pub use image::{CreateSpotImage, SpotImage};
pub use model::{CreateSpot, Spot, SpotRatingStats, SpotSummary, UpdateSpot};
