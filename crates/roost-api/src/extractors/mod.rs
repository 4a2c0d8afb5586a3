//! Axum extractors.

pub mod auth;
pub mod pagination;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::PaginationParams;
