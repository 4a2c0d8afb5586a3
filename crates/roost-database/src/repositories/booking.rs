//! Booking repository implementation.
//!
//! The conflict query and the exclusive write methods together enforce the
//! per-spot no-overlap invariant: `create_exclusive` and
//! `update_dates_exclusive` take a `FOR UPDATE` lock on the spot row, so
//! two concurrent writes for the same spot serialize and the second one
//! sees the first one's booking when it re-checks.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use roost_core::error::{AppError, ErrorKind};
use roost_core::result::AppResult;
use roost_entity::booking::{
    Booking, BookingPeriod, BookingWithGuest, BookingWithSpot, BookingWrite, CreateBooking,
};

/// Closed-interval overlap: an existing booking `[start_date, end_date]`
/// conflicts with the candidate `[$2, $3]` iff `start_date <= $3 AND
/// end_date >= $2`. `$4` optionally excludes the booking being edited.
const CONFLICT_SQL: &str = "SELECT * FROM bookings \
     WHERE spot_id = $1 \
       AND start_date <= $3 \
       AND end_date >= $2 \
       AND ($4::uuid IS NULL OR id <> $4) \
     ORDER BY start_date \
     LIMIT 1";

/// Repository for booking CRUD and availability queries.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    /// Return the first stored booking on `spot_id` whose range overlaps
    /// `[start_date, end_date]`, excluding `exclude_booking` if given.
    ///
    /// This is the standalone decision query; the write paths re-run the
    /// same condition inside their transaction.
    pub async fn find_conflicting(
        &self,
        spot_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_booking: Option<Uuid>,
    ) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>(CONFLICT_SQL)
            .bind(spot_id)
            .bind(start_date)
            .bind(end_date)
            .bind(exclude_booking)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check booking conflicts", e)
            })
    }

    /// Atomically check availability and insert a booking.
    ///
    /// Locks the spot row, re-checks the conflict condition against the
    /// full current set of the spot's bookings, and only then inserts.
    pub async fn create_exclusive(&self, data: &CreateBooking) -> AppResult<BookingWrite> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM spots WHERE id = $1 FOR UPDATE")
                .bind(data.spot_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to lock spot row", e)
                })?;

        if locked.is_none() {
            return Err(AppError::not_found(format!(
                "Spot {} not found",
                data.spot_id
            )));
        }

        let conflict = sqlx::query_as::<_, Booking>(CONFLICT_SQL)
            .bind(data.spot_id)
            .bind(data.start_date)
            .bind(data.end_date)
            .bind(Option::<Uuid>::None)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check booking conflicts", e)
            })?;

        if let Some(existing) = conflict {
            return Ok(BookingWrite::Conflict(existing));
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (spot_id, user_id, start_date, end_date) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.spot_id)
        .bind(data.user_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking", e)
        })?;

        Ok(BookingWrite::Stored(booking))
    }

    /// Atomically check availability and change a booking's dates.
    ///
    /// The booking itself is excluded from the conflict comparison so an
    /// edit that only overlaps its own previous range succeeds.
    pub async fn update_dates_exclusive(
        &self,
        booking_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> AppResult<BookingWrite> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(booking_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("Booking {booking_id} not found")))?;

        sqlx::query("SELECT id FROM spots WHERE id = $1 FOR UPDATE")
            .bind(booking.spot_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to lock spot row", e)
            })?;

        let conflict = sqlx::query_as::<_, Booking>(CONFLICT_SQL)
            .bind(booking.spot_id)
            .bind(start_date)
            .bind(end_date)
            .bind(Some(booking_id))
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check booking conflicts", e)
            })?;

        if let Some(existing) = conflict {
            return Ok(BookingWrite::Conflict(existing));
        }

        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET start_date = $2, end_date = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(booking_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit booking update", e)
        })?;

        Ok(BookingWrite::Stored(updated))
    }

    /// List a user's bookings joined with spot summaries, soonest first.
    pub async fn find_by_user_with_spot(&self, user_id: Uuid) -> AppResult<Vec<BookingWithSpot>> {
        sqlx::query_as::<_, BookingWithSpot>(
            "SELECT b.*, \
                    s.name AS spot_name, \
                    s.address AS spot_address, \
                    s.city AS spot_city, \
                    s.state AS spot_state, \
                    s.country AS spot_country, \
                    s.price AS spot_price, \
                    (SELECT si.url FROM spot_images si \
                      WHERE si.spot_id = s.id AND si.preview LIMIT 1) AS preview_image \
             FROM bookings b \
             INNER JOIN spots s ON b.spot_id = s.id \
             WHERE b.user_id = $1 \
             ORDER BY b.start_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user bookings", e))
    }

    /// List a spot's bookings joined with guest identity (owner view).
    pub async fn find_by_spot_with_guest(&self, spot_id: Uuid) -> AppResult<Vec<BookingWithGuest>> {
        sqlx::query_as::<_, BookingWithGuest>(
            "SELECT b.*, \
                    u.first_name AS guest_first_name, \
                    u.last_name AS guest_last_name, \
                    u.email AS guest_email \
             FROM bookings b \
             INNER JOIN users u ON b.user_id = u.id \
             WHERE b.spot_id = $1 \
             ORDER BY b.start_date ASC",
        )
        .bind(spot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list spot bookings", e))
    }

    /// List only the occupied periods of a spot (non-owner view).
    pub async fn find_periods_by_spot(&self, spot_id: Uuid) -> AppResult<Vec<BookingPeriod>> {
        sqlx::query_as::<_, BookingPeriod>(
            "SELECT spot_id, start_date, end_date FROM bookings \
             WHERE spot_id = $1 ORDER BY start_date ASC",
        )
        .bind(spot_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list booking periods", e)
        })
    }

    /// Delete a booking by ID.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete booking", e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
