//! Session lifecycle manager — login, logout, refresh token flows.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use uuid::Uuid;

use roost_core::config::auth::AuthConfig;
use roost_core::error::AppError;
use roost_database::repositories::session::SessionRepository;
use roost_database::repositories::user::UserRepository;
use roost_entity::session::Session;
use roost_entity::user::User;

use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
///
/// Sessions are rows in the `sessions` table; a JWT is only honored while
/// its session row is live. Logout revokes the row, which invalidates both
/// tokens of the pair at once.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_repo: Arc<SessionRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration.
    auth_config: AuthConfig,
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_repo: Arc<SessionRepository>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_repo,
            user_repo,
            password_hasher,
            auth_config,
        }
    }

    /// Performs the complete login flow: credential lookup (username or
    /// email), password verification, session creation, token issuance.
    ///
    /// Lookup miss and password mismatch produce the same error so the
    /// response does not reveal which credential exists.
    pub async fn login(&self, credential: &str, password: &str) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_credential(credential)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let (session, tokens) = self.issue_session(&user).await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            tokens,
            session,
            user,
        })
    }

    /// Creates a session row and a token pair for an already-authenticated
    /// user. Used by login and by signup's auto-login.
    pub async fn issue_session(&self, user: &User) -> Result<(Session, TokenPair), AppError> {
        let expires_at = Utc::now() + Duration::hours(self.auth_config.session_ttl_hours as i64);
        let session = self.session_repo.create(user.id, expires_at).await?;

        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, session.id, &user.username)?;

        Ok((session, tokens))
    }

    /// Exchanges a live refresh token for a new token pair and extends the
    /// session's expiry.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;

        let session = self.validate_session(claims.session_id()).await?;

        let user = self
            .user_repo
            .find_by_id(session.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("User no longer exists"))?;

        let new_expiry = Utc::now() + Duration::hours(self.auth_config.session_ttl_hours as i64);
        self.session_repo.extend(session.id, new_expiry).await?;

        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, session.id, &user.username)?;

        info!(user_id = %user.id, session_id = %session.id, "Session refreshed");

        Ok(tokens)
    }

    /// Revokes a session (logout). Idempotent.
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        self.session_repo.revoke(session_id).await?;
        info!(session_id = %session_id, "Session revoked");
        Ok(())
    }

    /// Loads a session and rejects it unless it is live.
    ///
    /// Called on every authenticated request by the `AuthUser` extractor,
    /// so a revoked session invalidates unexpired tokens immediately.
    pub async fn validate_session(&self, session_id: Uuid) -> Result<Session, AppError> {
        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Session not found"))?;

        if !session.is_live() {
            return Err(AppError::unauthorized("Session is no longer active"));
        }

        Ok(session)
    }
}
