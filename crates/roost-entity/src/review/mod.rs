//! Review entity.

pub mod image;
pub mod model;

pub use image::{CreateReviewImage, ReviewImage};
pub use model::{CreateReview, Review, ReviewWithSpot, ReviewWithUser, UpdateReview};
