//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Days, NaiveDate, Utc};
use http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use roost_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application with a clean database
    pub async fn new() -> Self {
        let config = AppConfig::load("tests/fixtures/test_config")
            .expect("Failed to load test config");

        let db_pool = roost_database::connection::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        roost_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

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
            roost_database::repositories::review_image::ReviewImageRepository::new(
                db_pool.clone(),
            ),
        );

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

        let router = roost_api::router::build_router(app_state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    /// Clean all test data from the database
    async fn clean_database(pool: &PgPool) {
        let tables = [
            "review_images",
            "reviews",
            "bookings",
            "spot_images",
            "spots",
            "sessions",
            "users",
        ];

        for table in &tables {
            let query = format!("DELETE FROM {}", table);
            let _ = sqlx::query(&query).execute(pool).await;
        }
    }

    /// Create a test user directly in the database and return their ID
    pub async fn create_test_user(&self, username: &str, password: &str) -> Uuid {
        let hasher = roost_auth::password::hasher::PasswordHasher::new();
        let hash = hasher
            .hash_password(password)
            .expect("Failed to hash password");
        let id = Uuid::new_v4();

        sqlx::query(
            "INSERT INTO users (id, email, username, first_name, last_name, password_hash) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(format!("{}@test.io", username.to_lowercase()))
        .bind(username)
        .bind("Test")
        .bind(username)
        .bind(&hash)
        .execute(&self.db_pool)
        .await
        .expect("Failed to create test user");

        id
    }

    /// Login and return a JWT access token
    pub async fn login(&self, credential: &str, password: &str) -> String {
        let body = serde_json::json!({
            "credential": credential,
            "password": password,
        });

        let response = self.request("POST", "/api/session", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create a spot via the API and return its ID
    pub async fn create_spot(&self, token: &str, name: &str) -> Uuid {
        let body = serde_json::json!({
            "address": "1 Test Lane",
            "city": "Testville",
            "state": "TS",
            "country": "Testland",
            "lat": 45.0,
            "lng": -122.0,
            "name": name,
            "description": "A place to stay during tests",
            "price": 125.0,
        });

        let response = self
            .request("POST", "/api/spots", Some(body), Some(token))
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Spot creation failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .expect("No id in spot response")
            .parse()
            .expect("Spot id is not a UUID")
    }

    /// Book a spot via the API, asserting success, and return the booking ID
    pub async fn create_booking(
        &self,
        token: &str,
        spot_id: Uuid,
        start: &str,
        end: &str,
    ) -> Uuid {
        let response = self
            .request(
                "POST",
                &format!("/api/spots/{}/bookings", spot_id),
                Some(serde_json::json!({ "start_date": start, "end_date": end })),
                Some(token),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Booking failed: {:?}",
            response.body
        );

        response.body["data"]["id"]
            .as_str()
            .expect("No id in booking response")
            .parse()
            .expect("Booking id is not a UUID")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A calendar date `days` days from today, formatted for JSON bodies.
pub fn days_from_now(days: u64) -> String {
    future_date(days).format("%Y-%m-%d").to_string()
}

/// A `NaiveDate` `days` days from today.
pub fn future_date(days: u64) -> NaiveDate {
    Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date overflow")
}
