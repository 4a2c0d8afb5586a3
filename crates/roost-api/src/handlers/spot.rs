//! Spot handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use roost_core::error::AppError;
use roost_core::types::pagination::PageResponse;
use roost_service::spot::service::{
    CreateSpotRequest as SvcCreateSpot, UpdateSpotRequest as SvcUpdateSpot,
};

use crate::dto::request::{CreateSpotRequest, UpdateSpotRequest};
use crate::dto::response::{
    ApiResponse, MessageResponse, OwnerResponse, SpotDetailResponse, SpotResponse,
    SpotSummaryResponse,
};
use crate::extractors::{AuthUser, PaginationParams};
use crate::handlers::validate_request;
use crate::state::AppState;

/// GET /api/spots
pub async fn list_spots(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<SpotSummaryResponse>>>, AppError> {
    let page = state
        .spot_service
        .list_spots(params.into_page_request())
        .await?;

    Ok(Json(ApiResponse::ok(page.map(Into::into))))
}

/// GET /api/spots/current
pub async fn list_current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<SpotSummaryResponse>>>, AppError> {
    let spots = state.spot_service.list_owned(&auth).await?;

    Ok(Json(ApiResponse::ok(
        spots.into_iter().map(Into::into).collect(),
    )))
}

/// GET /api/spots/{id}
pub async fn get_spot(
    State(state): State<AppState>,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SpotDetailResponse>>, AppError> {
    let detail = state.spot_service.get_spot(spot_id).await?;

    Ok(Json(ApiResponse::ok(SpotDetailResponse {
        spot: detail.spot.into(),
        num_reviews: detail.stats.num_reviews,
        avg_star_rating: detail.stats.avg_star_rating,
        images: detail.images.into_iter().map(Into::into).collect(),
        owner: OwnerResponse {
            id: detail.owner.id,
            first_name: detail.owner.first_name,
            last_name: detail.owner.last_name,
        },
    })))
}

/// POST /api/spots
pub async fn create_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateSpotRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpotResponse>>), AppError> {
    validate_request(&req)?;

    let spot = state
        .spot_service
        .create_spot(
            &auth,
            SvcCreateSpot {
                address: req.address,
                city: req.city,
                state: req.state,
                country: req.country,
                lat: req.lat,
                lng: req.lng,
                name: req.name,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(spot.into()))))
}

/// PUT /api/spots/{id}
pub async fn update_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
    Json(req): Json<UpdateSpotRequest>,
) -> Result<Json<ApiResponse<SpotResponse>>, AppError> {
    validate_request(&req)?;

    let spot = state
        .spot_service
        .update_spot(
            &auth,
            spot_id,
            SvcUpdateSpot {
                address: req.address,
                city: req.city,
                state: req.state,
                country: req.country,
                lat: req.lat,
                lng: req.lng,
                name: req.name,
                description: req.description,
                price: req.price,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(spot.into())))
}

/// DELETE /api/spots/{id}
pub async fn delete_spot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(spot_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.spot_service.delete_spot(&auth, spot_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Successfully deleted".to_string(),
    })))
}
