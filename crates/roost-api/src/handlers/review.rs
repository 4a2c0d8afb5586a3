//! Review handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roost_core::error::AppError;

use crate::dto::request::{CreateReviewRequest, UpdateReviewRequest};
use crate::dto::response::{
    ApiResponse, MessageResponse, ReviewResponse, SpotReviewResponse, UserReviewResponse,
};
use crate::extractors::AuthUser;
use crate::handlers::validate_request;
use crate::state::AppState;

/// GET /api/reviews/current
pub async fn list_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<UserReviewResponse>>>, AppError> {
    let reviews = state.review_service.list_current(&auth).await?;

    Ok(Json(ApiResponse::ok(
        reviews.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/spots/{id}/reviews
pub async fn list_for_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SpotReviewResponse>>>, AppError> {
    let reviews = state.review_service.list_for_spot(spot_id).await?;

    Ok(Json(ApiResponse::ok(
        reviews.into_iter().map(Into::into).collect(),
    )))
}

/// POST /api/spots/{id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewResponse>>), AppError> {
    validate_request(&req)?;

    let review = state
        .review_service
        .create_review(&auth, spot_id, req.review, req.stars)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(review.into()))))
}

/// PUT /api/reviews/{id}
pub async fn update_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
    Json(req): Json<UpdateReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResponse>>, AppError> {
    validate_request(&req)?;

    let review = state
        .review_service
        .update_review(&auth, review_id, req.review, req.stars)
        .await?;

    Ok(Json(ApiResponse::ok(review.into())))
}

/// DELETE /api/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(review_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.review_service.delete_review(&auth, review_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Successfully deleted".to_string(),
    })))
}
