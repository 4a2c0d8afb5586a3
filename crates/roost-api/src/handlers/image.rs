//! Spot and review image handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roost_core::error::AppError;

use crate::dto::request::{CreateReviewImageRequest, CreateSpotImageRequest};
use crate::dto::response::{
    ApiResponse, MessageResponse, ReviewImageResponse, SpotImageResponse,
};
use crate::extractors::AuthUser;
use crate::handlers::validate_request;
use crate::state::AppState;

/// POST /api/spots/{id}/images
pub async fn add_spot_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
    Json(req): Json<CreateSpotImageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpotImageResponse>>), AppError> {
    validate_request(&req)?;

    let image = state
        .spot_service
        .add_image(&auth, spot_id, req.url, req.preview)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image.into()))))
}

/// DELETE /api/spot-images/{id}
pub async fn delete_spot_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(image_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.spot_service.delete_image(&auth, image_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Successfully deleted".to_string(),
    })))
}

/// POST /api/reviews/{id}/images
pub async fn add_review_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Json(req): Json<CreateReviewImageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewImageResponse>>), AppError> {
    validate_request(&req)?;

    let image = state
        .review_service
        .add_image(&auth, review_id, req.url)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image.into()))))
}

/// DELETE /api/review-images/{id}
pub async fn delete_review_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(image_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.review_service.delete_image(&auth, image_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Successfully deleted".to_string(),
    })))
}
