//! Booking entity model.
//!
//! Booking dates are inclusive calendar dates: a booking `[start_date,
//! end_date]` occupies the spot on both endpoints, so two bookings on the
//! same spot may not even touch at a boundary.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A reservation of a spot for an inclusive date range.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The booked spot.
    pub spot_id: Uuid,
    /// The user who booked.
    pub user_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// The spot to book.
    pub spot_id: Uuid,
    /// The booking user.
    pub user_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
}

/// Outcome of an atomic availability check + booking write.
///
/// Returned by the repository methods that lock the spot row, re-check the
/// conflict condition, and insert or update inside one transaction.
#[derive(Debug, Clone)]
pub enum BookingWrite {
    /// The booking was stored.
    Stored(Booking),
    /// An existing booking overlaps the requested range; nothing was written.
    Conflict(Booking),
}

/// A booking joined with a summary of its spot, for the current-user list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingWithSpot {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The booked spot.
    pub spot_id: Uuid,
    /// The user who booked.
    pub user_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
    /// Spot listing name.
    pub spot_name: String,
    /// Spot street address.
    pub spot_address: String,
    /// Spot city.
    pub spot_city: String,
    /// Spot state.
    pub spot_state: String,
    /// Spot country.
    pub spot_country: String,
    /// Spot price per night.
    pub spot_price: f64,
    /// Spot preview image URL, if set.
    pub preview_image: Option<String>,
}

/// A booking joined with the booking user's identity, shown to spot owners.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingWithGuest {
    /// Unique booking identifier.
    pub id: Uuid,
    /// The booked spot.
    pub spot_id: Uuid,
    /// The user who booked.
    pub user_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When the booking was last updated.
    pub updated_at: DateTime<Utc>,
    /// Guest given name.
    pub guest_first_name: String,
    /// Guest family name.
    pub guest_last_name: String,
    /// Guest email.
    pub guest_email: String,
}

/// The reduced booking view shown to non-owners of a spot.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingPeriod {
    /// The booked spot.
    pub spot_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
}
