//! Booking entity.

pub mod model;

pub use model::{
    Booking, BookingPeriod, BookingWithGuest, BookingWithSpot, BookingWrite, CreateBooking,
};
