//! Route definitions for the Roost HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(session_routes())
        .merge(user_routes())
        .merge(spot_routes())
        .merge(review_routes())
        .merge(booking_routes())
        .merge(image_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Session endpoints: login, logout, refresh, restore
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/session", post(handlers::session::login))
        .route("/session", delete(handlers::session::logout))
        .route("/session", get(handlers::session::current))
        .route("/session/refresh", post(handlers::session::refresh))
}

/// User endpoints: signup, current profile
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::signup))
        .route("/users/current", get(handlers::user::current))
}

/// Spot CRUD plus nested reviews and bookings
fn spot_routes() -> Router<AppState> {
    Router::new()
        .route("/spots", get(handlers::spot::list_spots))
        .route("/spots", post(handlers::spot::create_spot))
        .route("/spots/current", get(handlers::spot::list_current))
        .route("/spots/{id}", get(handlers::spot::get_spot))
        .route("/spots/{id}", put(handlers::spot::update_spot))
        .route("/spots/{id}", delete(handlers::spot::delete_spot))
        .route("/spots/{id}/reviews", get(handlers::review::list_for_spot))
        .route("/spots/{id}/reviews", post(handlers::review::create_review))
        .route(
            "/spots/{id}/bookings",
            get(handlers::booking::list_for_spot),
        )
        .route(
            "/spots/{id}/bookings",
            post(handlers::booking::create_booking),
        )
}

/// Review endpoints outside the spot nesting
fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/reviews/current", get(handlers::review::list_current))
        .route("/reviews/{id}", put(handlers::review::update_review))
        .route("/reviews/{id}", delete(handlers::review::delete_review))
}

/// Booking endpoints outside the spot nesting
fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/bookings/current", get(handlers::booking::list_current))
        .route("/bookings/{id}", put(handlers::booking::update_booking))
        .route("/bookings/{id}", delete(handlers::booking::delete_booking))
}

/// Image attach/detach endpoints
fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/spots/{id}/images", post(handlers::image::add_spot_image))
        .route(
            "/spot-images/{id}",
            delete(handlers::image::delete_spot_image),
        )
        .route(
            "/reviews/{id}/images",
            post(handlers::image::add_review_image),
        )
        .route(
            "/review-images/{id}",
            delete(handlers::image::delete_review_image),
        )
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/detailed", get(handlers::health::detailed_health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new();

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    cors = cors.allow_methods(methods);

    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_headers(Any);
    }

    cors = cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds));

    cors
}
