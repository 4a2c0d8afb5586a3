//! Roost Server — Property Rental Marketplace API
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use roost_core::config::AppConfig;
use roost_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("ROOST_CONFIG").unwrap_or_else(|_| "config/default".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Roost v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = roost_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    roost_database::migration::run_migrations(&db_pool).await?;

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(roost_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let session_repo = Arc::new(
        roost_database::repositories::session::SessionRepository::new(db_pool.clone()),
    );
    let spot_repo = Arc::new(roost_database::repositories::spot::SpotRepository::new(
        db_pool.clone(),
    ));
    let spot_image_repo = Arc::new(
        roost_database::repositories::spot_image::SpotImageRepository::new(db_pool.clone()),
    );
    let booking_repo = Arc::new(
        roost_database::repositories::booking::BookingRepository::new(db_pool.clone()),
    );
    let review_repo = Arc::new(roost_database::repositories::review::ReviewRepository::new(
        db_pool.clone(),
    ));
    let review_image_repo = Arc::new(
        roost_database::repositories::review_image::ReviewImageRepository::new(db_pool.clone()),
    );

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(roost_auth::password::hasher::PasswordHasher::new());
    let jwt_encoder = Arc::new(roost_auth::jwt::encoder::JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(roost_auth::jwt::decoder::JwtDecoder::new(&config.auth));
    let session_manager = Arc::new(roost_auth::session::manager::SessionManager::new(
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        Arc::clone(&session_repo),
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        config.auth.clone(),
    ));

    // ── Services ─────────────────────────────────────────────────
    let user_service = Arc::new(roost_service::user::service::UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&session_manager),
        config.auth.clone(),
    ));
    let spot_service = Arc::new(roost_service::spot::service::SpotService::new(
        Arc::clone(&spot_repo),
        Arc::clone(&spot_image_repo),
        Arc::clone(&user_repo),
    ));
    let booking_service = Arc::new(roost_service::booking::service::BookingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&spot_repo),
    ));
    let review_service = Arc::new(roost_service::review::service::ReviewService::new(
        Arc::clone(&review_repo),
        Arc::clone(&review_image_repo),
        Arc::clone(&spot_repo),
    ));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = roost_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        jwt_decoder,
        session_manager,
        user_service,
        spot_service,
        booking_service,
        review_service,
    };

    let app = roost_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Roost server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("Roost server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
