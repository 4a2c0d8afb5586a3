//! # roost-service
//!
//! Business logic for Roost. Each resource gets a service that owns the
//! policy decisions (existence, ownership, date rules) and orchestrates
//! repositories; the [`availability`] module holds the booking conflict
//! rule the write paths enforce.

pub mod availability;
pub mod booking;
pub mod context;
pub mod review;
pub mod spot;
pub mod user;

pub use context::RequestContext;
