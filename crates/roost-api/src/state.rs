//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use roost_auth::jwt::decoder::JwtDecoder;
use roost_auth::session::manager::SessionManager;
use roost_core::config::AppConfig;
use roost_service::booking::service::BookingService;
use roost_service::review::service::ReviewService;
use roost_service::spot::service::SpotService;
use roost_service::user::service::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool (health checks).
    pub db_pool: PgPool,

    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,

    /// User signup/profile service.
    pub user_service: Arc<UserService>,
    /// Spot service.
    pub spot_service: Arc<SpotService>,
    /// Booking service.
    pub booking_service: Arc<BookingService>,
    /// Review service.
    pub review_service: Arc<ReviewService>,
}
