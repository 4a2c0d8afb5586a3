//! Response DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use roost_auth::jwt::encoder::TokenPair;
use roost_entity::booking::{Booking, BookingPeriod, BookingWithGuest, BookingWithSpot};
use roost_entity::review::{Review, ReviewImage};
use roost_entity::spot::{Spot, SpotImage, SpotSummary};
use roost_entity::user::User;
use roost_service::review::service::{SpotReview, UserReview};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Email address.
    pub email: String,
    /// Username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

/// Login/signup response: the user plus a token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The authenticated user.
    pub user: UserResponse,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl AuthResponse {
    /// Builds the response from a user and their fresh token pair.
    pub fn new(user: User, tokens: TokenPair) -> Self {
        Self {
            user: user.into(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }
    }
}

/// Refreshed token pair response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<TokenPair> for TokenResponse {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
        }
    }
}

/// Current-session response; `user` is null when unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// The current user, if any.
    pub user: Option<UserResponse>,
}

/// A spot row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotResponse {
    /// Spot ID.
    pub id: Uuid,
    /// Owner ID.
    pub owner_id: Uuid,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Country.
    pub country: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Listing name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price per night.
    pub price: f64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Spot> for SpotResponse {
    fn from(spot: Spot) -> Self {
        Self {
            id: spot.id,
            owner_id: spot.owner_id,
            address: spot.address,
            city: spot.city,
            state: spot.state,
            country: spot.country,
            lat: spot.lat,
            lng: spot.lng,
            name: spot.name,
            description: spot.description,
            price: spot.price,
            created_at: spot.created_at,
            updated_at: spot.updated_at,
        }
    }
}

/// A spot list item with rating/preview aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotSummaryResponse {
    /// Spot ID.
    pub id: Uuid,
    /// Owner ID.
    pub owner_id: Uuid,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Country.
    pub country: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
    /// Listing name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price per night.
    pub price: f64,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// Mean star rating (null when unreviewed).
    pub avg_rating: Option<f64>,
    /// Preview image URL (null when unset).
    pub preview_image: Option<String>,
}

impl From<SpotSummary> for SpotSummaryResponse {
    fn from(s: SpotSummary) -> Self {
        Self {
            id: s.id,
            owner_id: s.owner_id,
            address: s.address,
            city: s.city,
            state: s.state,
            country: s.country,
            lat: s.lat,
            lng: s.lng,
            name: s.name,
            description: s.description,
            price: s.price,
            created_at: s.created_at,
            updated_at: s.updated_at,
            avg_rating: s.avg_rating,
            preview_image: s.preview_image,
        }
    }
}

/// A spot image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotImageResponse {
    /// Image ID.
    pub id: Uuid,
    /// Image URL.
    pub url: String,
    /// Whether this is the listing thumbnail.
    pub preview: bool,
}

impl From<SpotImage> for SpotImageResponse {
    fn from(image: SpotImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
            preview: image.preview,
        }
    }
}

/// Owner summary embedded in a spot's detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerResponse {
    /// Owner's user ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// Full spot detail: the listing plus aggregates, images, and owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotDetailResponse {
    /// The spot.
    #[serde(flatten)]
    pub spot: SpotResponse,
    /// Number of reviews.
    pub num_reviews: i64,
    /// Mean star rating (null when unreviewed).
    pub avg_star_rating: Option<f64>,
    /// Spot images, preview first.
    pub images: Vec<SpotImageResponse>,
    /// Owner summary.
    pub owner: OwnerResponse,
}

/// A review row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    /// Review ID.
    pub id: Uuid,
    /// Reviewed spot.
    pub spot_id: Uuid,
    /// Reviewing user.
    pub user_id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating.
    pub stars: i32,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            spot_id: review.spot_id,
            user_id: review.user_id,
            review: review.review,
            stars: review.stars,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

/// A review image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewImageResponse {
    /// Image ID.
    pub id: Uuid,
    /// Image URL.
    pub url: String,
}

impl From<ReviewImage> for ReviewImageResponse {
    fn from(image: ReviewImage) -> Self {
        Self {
            id: image.id,
            url: image.url,
        }
    }
}

/// Spot summary embedded in the current user's review list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSpotResponse {
    /// Spot ID.
    pub id: Uuid,
    /// Listing name.
    pub name: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Country.
    pub country: String,
    /// Price per night.
    pub price: f64,
}

/// One of the current user's reviews, with spot summary and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserReviewResponse {
    /// Review ID.
    pub id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating.
    pub stars: i32,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// The reviewed spot.
    pub spot: ReviewSpotResponse,
    /// Images attached to the review.
    pub images: Vec<ReviewImageResponse>,
}

impl From<UserReview> for UserReviewResponse {
    fn from(ur: UserReview) -> Self {
        let r = ur.review;
        Self {
            id: r.id,
            review: r.review,
            stars: r.stars,
            created_at: r.created_at,
            updated_at: r.updated_at,
            spot: ReviewSpotResponse {
                id: r.spot_id,
                name: r.spot_name,
                city: r.spot_city,
                state: r.spot_state,
                country: r.spot_country,
                price: r.spot_price,
            },
            images: ur.images.into_iter().map(Into::into).collect(),
        }
    }
}

/// Reviewer summary embedded in a spot's review list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerResponse {
    /// Reviewer's user ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// One review in a spot's review list, with reviewer and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotReviewResponse {
    /// Review ID.
    pub id: Uuid,
    /// Review text.
    pub review: String,
    /// Star rating.
    pub stars: i32,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// The reviewer.
    pub user: ReviewerResponse,
    /// Images attached to the review.
    pub images: Vec<ReviewImageResponse>,
}

impl From<SpotReview> for SpotReviewResponse {
    fn from(sr: SpotReview) -> Self {
        let r = sr.review;
        Self {
            id: r.id,
            review: r.review,
            stars: r.stars,
            created_at: r.created_at,
            updated_at: r.updated_at,
            user: ReviewerResponse {
                id: r.user_id,
                first_name: r.reviewer_first_name,
                last_name: r.reviewer_last_name,
            },
            images: sr.images.into_iter().map(Into::into).collect(),
        }
    }
}

/// A booking row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Booked spot.
    pub spot_id: Uuid,
    /// Booking user.
    pub user_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            spot_id: booking.spot_id,
            user_id: booking.user_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// Spot summary embedded in the current user's booking list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSpotResponse {
    /// Spot ID.
    pub id: Uuid,
    /// Listing name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Country.
    pub country: String,
    /// Price per night.
    pub price: f64,
    /// Preview image URL.
    pub preview_image: Option<String>,
}

/// One of the current user's bookings, with its spot summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserBookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// The booked spot.
    pub spot: BookingSpotResponse,
}

impl From<BookingWithSpot> for UserBookingResponse {
    fn from(b: BookingWithSpot) -> Self {
        Self {
            id: b.id,
            start_date: b.start_date,
            end_date: b.end_date,
            created_at: b.created_at,
            updated_at: b.updated_at,
            spot: BookingSpotResponse {
                id: b.spot_id,
                name: b.spot_name,
                address: b.spot_address,
                city: b.spot_city,
                state: b.spot_state,
                country: b.spot_country,
                price: b.spot_price,
                preview_image: b.preview_image,
            },
        }
    }
}

/// Guest identity embedded in the owner's booking list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestResponse {
    /// Guest's user ID.
    pub id: Uuid,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

/// A full booking record with guest identity (spot-owner view).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerBookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// Booked spot.
    pub spot_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
    /// The guest.
    pub guest: GuestResponse,
}

impl From<BookingWithGuest> for OwnerBookingResponse {
    fn from(b: BookingWithGuest) -> Self {
        Self {
            id: b.id,
            spot_id: b.spot_id,
            start_date: b.start_date,
            end_date: b.end_date,
            created_at: b.created_at,
            updated_at: b.updated_at,
            guest: GuestResponse {
                id: b.user_id,
                first_name: b.guest_first_name,
                last_name: b.guest_last_name,
                email: b.guest_email,
            },
        }
    }
}

/// The reduced booking view shown to non-owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingPeriodResponse {
    /// Booked spot.
    pub spot_id: Uuid,
    /// First occupied day (inclusive).
    pub start_date: NaiveDate,
    /// Last occupied day (inclusive).
    pub end_date: NaiveDate,
}

impl From<BookingPeriod> for BookingPeriodResponse {
    fn from(p: BookingPeriod) -> Self {
        Self {
            spot_id: p.spot_id,
            start_date: p.start_date,
            end_date: p.end_date,
        }
    }
}

/// A spot's booking list; the shape depends on whether the caller owns
/// the spot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpotBookingsResponse {
    /// Full records with guest identity.
    Owner(Vec<OwnerBookingResponse>),
    /// Occupied periods only.
    Guest(Vec<BookingPeriodResponse>),
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// Version.
    pub version: String,
}
