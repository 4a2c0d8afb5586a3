//! Session handlers — login, logout, refresh, current user.

use axum::Json;
use axum::extract::State;

use roost_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest};
use crate::dto::response::{
    ApiResponse, AuthResponse, MessageResponse, SessionResponse, TokenResponse,
};
use crate::extractors::{AuthUser, OptionalAuthUser};
use crate::handlers::validate_request;
use crate::state::AppState;

/// POST /api/session
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    validate_request(&req)?;

    let result = state
        .session_manager
        .login(&req.credential, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(
        result.user,
        result.tokens,
    ))))
}

/// DELETE /api/session
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.session_manager.logout(auth.session_id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "success".to_string(),
    })))
}

/// POST /api/session/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let tokens = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(tokens.into())))
}

/// GET /api/session
///
/// Anonymous callers get `user: null` rather than a 401, matching the
/// restore-session contract of the original product.
pub async fn current(
    State(state): State<AppState>,
    OptionalAuthUser(ctx): OptionalAuthUser,
) -> Result<Json<ApiResponse<SessionResponse>>, AppError> {
    let user = match ctx {
        Some(ctx) => Some(state.user_service.get_profile(&ctx).await?.into()),
        None => None,
    };

    Ok(Json(ApiResponse::ok(SessionResponse { user })))
}
