//! Booking service.

pub mod service;

pub use service::{BookingService, SpotBookings};
