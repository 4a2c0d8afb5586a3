//! Integration test suite: drives the full router against a live test
//! database.

mod helpers;

mod auth_test;
mod booking_test;
mod review_test;
mod spot_test;
