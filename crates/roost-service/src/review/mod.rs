//! Review service.

pub mod service;

pub use service::{ReviewService, SpotReview, UserReview};
