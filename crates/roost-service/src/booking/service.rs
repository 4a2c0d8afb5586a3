//! Booking CRUD and availability enforcement.
//!
//! The availability decision runs twice on the write paths: a pool-level
//! conflict lookup that can answer early with the conflicting record, and
//! the authoritative re-check inside the repository's spot-locked
//! transaction. The second check is what closes the race between two
//! concurrent requests for the same spot; the first keeps the common
//! rejection cheap.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use roost_core::error::AppError;
use roost_database::repositories::booking::BookingRepository;
use roost_database::repositories::spot::SpotRepository;
use roost_entity::booking::{
    Booking, BookingPeriod, BookingWithGuest, BookingWithSpot, BookingWrite, CreateBooking,
};

use crate::context::RequestContext;

/// User-facing message when a candidate range overlaps a stored booking.
const CONFLICT_MESSAGE: &str = "Spot is already booked for the specified dates";

/// A spot's booking list, shaped by who is asking.
#[derive(Debug, Clone)]
pub enum SpotBookings {
    /// The spot owner sees full booking records with guest identity.
    Owner(Vec<BookingWithGuest>),
    /// Everyone else sees only the occupied periods.
    Guest(Vec<BookingPeriod>),
}

/// Manages bookings and enforces the per-spot no-overlap invariant.
#[derive(Debug, Clone)]
pub struct BookingService {
    /// Booking repository.
    booking_repo: Arc<BookingRepository>,
    /// Spot repository (existence and ownership checks).
    spot_repo: Arc<SpotRepository>,
}

impl BookingService {
    /// Creates a new booking service.
    pub fn new(booking_repo: Arc<BookingRepository>, spot_repo: Arc<SpotRepository>) -> Self {
        Self {
            booking_repo,
            spot_repo,
        }
    }

    /// Lists the current user's bookings with spot summaries.
    pub async fn list_current(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<BookingWithSpot>, AppError> {
        self.booking_repo.find_by_user_with_spot(ctx.user_id).await
    }

    /// Lists a spot's bookings. The owner sees guest identities; other
    /// users only see which dates are taken.
    pub async fn list_for_spot(
        &self,
        ctx: &RequestContext,
        spot_id: Uuid,
    ) -> Result<SpotBookings, AppError> {
        let spot = self
            .spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        if spot.owner_id == ctx.user_id {
            let bookings = self.booking_repo.find_by_spot_with_guest(spot_id).await?;
            Ok(SpotBookings::Owner(bookings))
        } else {
            let periods = self.booking_repo.find_periods_by_spot(spot_id).await?;
            Ok(SpotBookings::Guest(periods))
        }
    }

    /// Books a spot for an inclusive date range.
    ///
    /// Rejections, in order: unknown spot (404), booking one's own spot
    /// (403), malformed range or past start date (400), and an
    /// overlapping booking (403 with [`CONFLICT_MESSAGE`]).
    pub async fn create_booking(
        &self,
        ctx: &RequestContext,
        spot_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Booking, AppError> {
        let spot = self
            .spot_repo
            .find_by_id(spot_id)
            .await?
            .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

        if spot.owner_id == ctx.user_id {
            return Err(AppError::forbidden("You cannot book your own spot"));
        }

        validate_range(start_date, end_date)?;

        if start_date < Utc::now().date_naive() {
            return Err(AppError::validation("startDate cannot be in the past"));
        }

        // Early answer for the common case; the exclusive create re-checks
        // under the spot lock before writing.
        if let Some(existing) = self
            .booking_repo
            .find_conflicting(spot_id, start_date, end_date, None)
            .await?
        {
            info!(
                user_id = %ctx.user_id,
                spot_id = %spot_id,
                conflicting_booking = %existing.id,
                "Booking rejected: dates unavailable"
            );
            return Err(AppError::forbidden(CONFLICT_MESSAGE));
        }

        let write = self
            .booking_repo
            .create_exclusive(&CreateBooking {
                spot_id,
                user_id: ctx.user_id,
                start_date,
                end_date,
            })
            .await?;

        match write {
            BookingWrite::Stored(booking) => {
                info!(
                    user_id = %ctx.user_id,
                    spot_id = %spot_id,
                    booking_id = %booking.id,
                    start_date = %booking.start_date,
                    end_date = %booking.end_date,
                    "Booking created"
                );
                Ok(booking)
            }
            BookingWrite::Conflict(existing) => {
                info!(
                    user_id = %ctx.user_id,
                    spot_id = %spot_id,
                    conflicting_booking = %existing.id,
                    "Booking rejected under lock: dates unavailable"
                );
                Err(AppError::forbidden(CONFLICT_MESSAGE))
            }
        }
    }

    /// Changes a booking's dates. Only the booking's author may edit, past
    /// bookings are immutable, and the booking itself is excluded from the
    /// conflict comparison.
    pub async fn update_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking couldn't be found"))?;

        if booking.user_id != ctx.user_id {
            return Err(AppError::forbidden("You can only edit your own bookings"));
        }

        if booking.end_date < Utc::now().date_naive() {
            return Err(AppError::validation("Past bookings can't be modified"));
        }

        validate_range(start_date, end_date)?;

        if let Some(existing) = self
            .booking_repo
            .find_conflicting(booking.spot_id, start_date, end_date, Some(booking_id))
            .await?
        {
            info!(
                user_id = %ctx.user_id,
                booking_id = %booking_id,
                conflicting_booking = %existing.id,
                "Booking update rejected: dates unavailable"
            );
            return Err(AppError::forbidden(CONFLICT_MESSAGE));
        }

        let write = self
            .booking_repo
            .update_dates_exclusive(booking_id, start_date, end_date)
            .await?;

        match write {
            BookingWrite::Stored(updated) => {
                info!(
                    user_id = %ctx.user_id,
                    booking_id = %booking_id,
                    start_date = %updated.start_date,
                    end_date = %updated.end_date,
                    "Booking updated"
                );
                Ok(updated)
            }
            BookingWrite::Conflict(existing) => {
                info!(
                    user_id = %ctx.user_id,
                    booking_id = %booking_id,
                    conflicting_booking = %existing.id,
                    "Booking update rejected under lock: dates unavailable"
                );
                Err(AppError::forbidden(CONFLICT_MESSAGE))
            }
        }
    }

    /// Deletes a booking. The booking's author or the spot's owner may
    /// delete.
    pub async fn delete_booking(
        &self,
        ctx: &RequestContext,
        booking_id: Uuid,
    ) -> Result<(), AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("Booking couldn't be found"))?;

        if booking.user_id != ctx.user_id {
            let spot = self
                .spot_repo
                .find_by_id(booking.spot_id)
                .await?
                .ok_or_else(|| AppError::not_found("Spot couldn't be found"))?;

            if spot.owner_id != ctx.user_id {
                return Err(AppError::forbidden(
                    "Only the guest or the spot owner can delete a booking",
                ));
            }
        }

        self.booking_repo.delete(booking_id).await?;

        info!(user_id = %ctx.user_id, booking_id = %booking_id, "Booking deleted");

        Ok(())
    }
}

/// Rejects ranges whose end precedes their start. Equal endpoints are a
/// valid one-day booking.
fn validate_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), AppError> {
    if end_date < start_date {
        return Err(AppError::validation("endDate cannot be before startDate"));
    }
    Ok(())
}
