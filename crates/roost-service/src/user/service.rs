//! User signup and profile service.

use std::sync::Arc;

use tracing::info;

use roost_auth::password::{PasswordHasher, validate_strength};
use roost_auth::session::manager::{LoginResult, SessionManager};
use roost_core::config::auth::AuthConfig;
use roost_core::error::AppError;
use roost_database::repositories::user::UserRepository;
use roost_entity::user::{CreateUser, User};

use crate::context::RequestContext;

/// Request to create a new account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignupRequest {
    /// Email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Plaintext password (hashed here, never stored).
    pub password: String,
}

/// Manages account creation and profile reads.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Session manager for signup auto-login.
    session_manager: Arc<SessionManager>,
    /// Auth configuration (password policy).
    auth_config: AuthConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        session_manager: Arc<SessionManager>,
        auth_config: AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            session_manager,
            auth_config,
        }
    }

    /// Creates an account and logs the new user in.
    ///
    /// Duplicate username/email surfaces as a conflict from the
    /// repository. The password is strength-checked before hashing.
    pub async fn signup(&self, req: SignupRequest) -> Result<LoginResult, AppError> {
        validate_strength(&req.password, self.auth_config.password_min_length)?;

        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                email: req.email,
                username: req.username,
                first_name: req.first_name,
                last_name: req.last_name,
                password_hash,
            })
            .await?;

        let (session, tokens) = self.session_manager.issue_session(&user).await?;

        info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(LoginResult {
            tokens,
            session,
            user,
        })
    }

    /// Returns the current user's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
