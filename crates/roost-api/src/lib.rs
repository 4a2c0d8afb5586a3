//! # roost-api
//!
//! HTTP API layer for Roost built on Axum.
//!
//! Provides all REST endpoints, middleware (CORS, trace, request logging),
//! extractors, DTOs, and error mapping.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
