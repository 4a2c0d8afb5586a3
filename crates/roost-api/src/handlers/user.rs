//! User handlers — signup and current profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use roost_core::error::AppError;
use roost_service::user::service::SignupRequest as SvcSignup;

use crate::dto::request::SignupRequest;
use crate::dto::response::{ApiResponse, AuthResponse, UserResponse};
use crate::extractors::AuthUser;
use crate::handlers::validate_request;
use crate::state::AppState;

/// POST /api/users
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    validate_request(&req)?;

    let result = state
        .user_service
        .signup(SvcSignup {
            email: req.email,
            username: req.username,
            first_name: req.first_name,
            last_name: req.last_name,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthResponse::new(
            result.user,
            result.tokens,
        ))),
    ))
}

/// GET /api/users/current
pub async fn current(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.get_profile(&auth).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}
