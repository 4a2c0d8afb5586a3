//! The booking conflict rule.
//!
//! Booking dates are closed intervals on whole days: a booking occupies
//! the spot on its start date, its end date, and everything between. Two
//! closed intervals `[a, b]` and `[c, d]` overlap iff `a <= d && c <= b`.
//! This single condition covers every case people tend to enumerate
//! separately (candidate start inside an existing range, candidate end
//! inside, candidate containing an existing range) and it makes
//! boundary-touching ranges a conflict: a stay ending October 5 still
//! occupies the spot on October 5, so a stay starting October 5 cannot be
//! accepted.
//!
//! The repository's conflict query expresses the same condition in SQL and
//! is the authority on the write path (inside the spot-locked
//! transaction); this module is the rule itself, kept pure so it can be
//! tested exhaustively without a database.

use chrono::NaiveDate;
use uuid::Uuid;

use roost_entity::booking::Booking;

/// Returns whether the closed date intervals `[a_start, a_end]` and
/// `[b_start, b_end]` share at least one day.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Returns the first booking in `bookings` whose range overlaps the
/// candidate `[start_date, end_date]`, skipping `exclude_booking` so an
/// edit never conflicts with itself.
///
/// Scope is the caller's responsibility: pass only bookings of the spot
/// under consideration.
pub fn find_conflict<'a>(
    bookings: &'a [Booking],
    start_date: NaiveDate,
    end_date: NaiveDate,
    exclude_booking: Option<Uuid>,
) -> Option<&'a Booking> {
    bookings
        .iter()
        .filter(|b| exclude_booking != Some(b.id))
        .find(|b| ranges_overlap(b.start_date, b.end_date, start_date, end_date))
}
