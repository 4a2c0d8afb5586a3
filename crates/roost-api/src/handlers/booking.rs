//! Booking handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roost_core::error::AppError;
use roost_service::booking::service::SpotBookings;

use crate::dto::request::BookingDatesRequest;
use crate::dto::response::{
    ApiResponse, BookingResponse, MessageResponse, SpotBookingsResponse, UserBookingResponse,
};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/bookings/current
pub async fn list_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserBookingResponse>>>, AppError> {
    let bookings = state.booking_service.list_current(&auth).await?;

    Ok(Json(ApiResponse::ok(
        bookings.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/spots/{id}/bookings
pub async fn list_for_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SpotBookingsResponse>>, AppError> {
    let bookings = state.booking_service.list_for_spot(&auth, spot_id).await?;

    let response = match bookings {
        SpotBookings::Owner(full) => {
            SpotBookingsResponse::Owner(full.into_iter().map(Into::into).collect())
        }
        SpotBookings::Guest(periods) => {
            SpotBookingsResponse::Guest(periods.into_iter().map(Into::into).collect())
        }
    };

    Ok(Json(ApiResponse::ok(response)))
}

/// POST /api/spots/{id}/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
    Json(req): Json<BookingDatesRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), AppError> {
    let booking = state
        .booking_service
        .create_booking(&auth, spot_id, req.start_date, req.end_date)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(booking.into()))))
}

/// PUT /api/bookings/{id}
pub async fn update_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
    Json(req): Json<BookingDatesRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, AppError> {
    let booking = state
        .booking_service
        .update_booking(&auth, booking_id, req.start_date, req.end_date)
        .await?;

    Ok(Json(ApiResponse::ok(booking.into())))
}

/// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.booking_service.delete_booking(&auth, booking_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Successfully deleted".to_string(),
    })))
}
