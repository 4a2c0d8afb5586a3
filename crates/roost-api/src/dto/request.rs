//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Signup request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address.
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,
    /// Desired username.
    #[validate(
        length(min = 4, max = 100, message = "Username must be at least 4 characters"),
        custom(function = username_not_email)
    )]
    pub username: String,
    /// Given name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Family name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Plaintext password.
    #[validate(length(min = 6, message = "Password must be 6 characters or more"))]
    pub password: String,
}

/// Login request body. `credential` accepts a username or an email.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email.
    #[validate(length(min = 1, message = "Please provide a valid email or username"))]
    pub credential: String,
    /// Password.
    #[validate(length(min = 1, message = "Please provide a password"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create spot request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSpotRequest {
    /// Street address.
    #[validate(length(min = 1, max = 255, message = "Street address is required"))]
    pub address: String,
    /// City.
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    /// State or region.
    #[validate(length(min = 1, max = 50, message = "State is required"))]
    pub state: String,
    /// Country.
    #[validate(length(min = 1, max = 50, message = "Country is required"))]
    pub country: String,
    /// Latitude.
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude is not valid"))]
    pub lat: f64,
    /// Longitude.
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude is not valid"))]
    pub lng: f64,
    /// Listing name.
    #[validate(length(min = 1, max = 50, message = "Name must be less than 50 characters"))]
    pub name: String,
    /// Listing description.
    #[validate(length(min = 1, max = 1000, message = "Description is required"))]
    pub description: String,
    /// Price per night.
    #[validate(range(min = 0.0, message = "Price per day is required"))]
    pub price: f64,
}

/// Update spot request. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateSpotRequest {
    /// New street address.
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    /// New city.
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
    /// New state.
    #[validate(length(min = 1, max = 50))]
    pub state: Option<String>,
    /// New country.
    #[validate(length(min = 1, max = 50))]
    pub country: Option<String>,
    /// New latitude.
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    /// New longitude.
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    /// New listing name.
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(min = 1, max = 1000))]
    pub description: Option<String>,
    /// New price per night.
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
}

/// Attach an image to a spot.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSpotImageRequest {
    /// Image URL.
    #[validate(url(message = "Image url is not valid"))]
    pub url: String,
    /// Whether this image becomes the listing thumbnail.
    #[serde(default)]
    pub preview: bool,
}

/// Create review request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    /// Review text.
    #[validate(length(min = 1, max = 1000, message = "Review text is required"))]
    pub review: String,
    /// Star rating.
    #[validate(range(min = 1, max = 5, message = "Stars must be an integer from 1 to 5"))]
    pub stars: i32,
}

/// Update review request. Omitted fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    /// New review text.
    #[validate(length(min = 1, max = 1000))]
    pub review: Option<String>,
    /// New star rating.
    #[validate(range(min = 1, max = 5, message = "Stars must be an integer from 1 to 5"))]
    pub stars: Option<i32>,
}

/// Attach an image to a review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewImageRequest {
    /// Image URL.
    #[validate(url(message = "Image url is not valid"))]
    pub url: String,
}

/// Create or update booking request. Dates are inclusive calendar days;
/// range ordering and past-date rules are enforced by the booking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDatesRequest {
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
}

/// Usernames may not themselves be email addresses, so logins by
/// credential stay unambiguous.
fn username_not_email(username: &str) -> Result<(), ValidationError> {
    if username.contains('@') {
        return Err(ValidationError::new("username_is_email")
            .with_message("Username cannot be an email".into()));
    }
    Ok(())
}
