//! `AuthUser` extractor — pulls the bearer JWT from the Authorization
//! header, validates it and its backing session, and injects the request
//! context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use roost_core::error::AppError;
use roost_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::unauthorized("Authentication required"))?;

        authenticate(parts, state, bearer.token()).await.map(AuthUser)
    }
}

/// Like [`AuthUser`], but anonymous requests extract as `None` instead of
/// being rejected. Invalid credentials are still an error.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<RequestContext>);

impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;

        match header {
            Ok(TypedHeader(Authorization(bearer))) => {
                let ctx = authenticate(parts, state, bearer.token()).await?;
                Ok(OptionalAuthUser(Some(ctx)))
            }
            Err(_) => Ok(OptionalAuthUser(None)),
        }
    }
}

/// Decodes the token, checks the backing session is live, and assembles
/// the request context.
async fn authenticate(
    parts: &Parts,
    state: &AppState,
    token: &str,
) -> Result<RequestContext, AppError> {
    let claims = state.jwt_decoder.decode_access_token(token)?;

    // A revoked or expired session invalidates the token immediately.
    state
        .session_manager
        .validate_session(claims.session_id())
        .await?;

    let ip_address = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let user_agent = parts
        .headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    Ok(RequestContext::new(
        claims.user_id(),
        claims.session_id(),
        claims.username,
        ip_address,
        user_agent,
    ))
}
