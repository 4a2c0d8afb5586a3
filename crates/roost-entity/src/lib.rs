//! # roost-entity
//!
//! Domain entity models for Roost: users, sessions, spots, bookings,
//! reviews, and their images. Every model derives `sqlx::FromRow` so the
//! repository layer can map query results directly.

pub mod booking;
pub mod review;
pub mod session;
pub mod spot;
pub mod user;
