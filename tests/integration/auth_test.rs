//! Integration tests for signup, login, logout, refresh, and session
//! restore.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_signup_returns_tokens_and_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "email": "alice@example.com",
                "username": "alice-rents",
                "first_name": "Alice",
                "last_name": "Archer",
                "password": "correct-horse-battery",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"]["refresh_token"].is_string());
    assert_eq!(response.body["data"]["user"]["username"], "alice-rents");
    // The password hash must never appear in a response.
    assert!(response.body["data"]["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username_conflicts() {
    let app = TestApp::new().await;
    app.create_test_user("taken-name", "correct-horse-battery")
        .await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "email": "other@example.com",
                "username": "taken-name",
                "first_name": "Other",
                "last_name": "Person",
                "password": "correct-horse-battery",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_weak_password_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "email": "weak@example.com",
                "username": "weak-password",
                "first_name": "Weak",
                "last_name": "Password",
                "password": "password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_email_as_username_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "email": "real@example.com",
                "username": "fake@example.com",
                "first_name": "A",
                "last_name": "B",
                "password": "correct-horse-battery",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new().await;
    app.create_test_user("flexible", "correct-horse-battery")
        .await;

    // create_test_user derives the email from the username
    let by_username = app.login("flexible", "correct-horse-battery").await;
    let by_email = app.login("flexible@test.io", "correct-horse-battery").await;

    assert!(!by_username.is_empty());
    assert!(!by_email.is_empty());
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    app.create_test_user("locked-out", "correct-horse-battery")
        .await;

    let response = app
        .request(
            "POST",
            "/api/session",
            Some(serde_json::json!({
                "credential": "locked-out",
                "password": "wrong-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/session",
            Some(serde_json::json!({
                "credential": "nobody",
                "password": "correct-horse-battery",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_restore_and_anonymous() {
    let app = TestApp::new().await;
    app.create_test_user("restorer", "correct-horse-battery")
        .await;

    // Anonymous: user is null, not a 401.
    let response = app.request("GET", "/api/session", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["user"].is_null());

    let token = app.login("restorer", "correct-horse-battery").await;
    let response = app.request("GET", "/api/session", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["username"], "restorer");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = TestApp::new().await;
    app.create_test_user("leaver", "correct-horse-battery").await;
    let token = app.login("leaver", "correct-horse-battery").await;

    let response = app.request("DELETE", "/api/session", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    // The session is revoked, so the unexpired token no longer works.
    let response = app
        .request("GET", "/api/users/current", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::new().await;
    app.create_test_user("refresher", "correct-horse-battery")
        .await;

    let login = app
        .request(
            "POST",
            "/api/session",
            Some(serde_json::json!({
                "credential": "refresher",
                "password": "correct-horse-battery",
            })),
            None,
        )
        .await;

    let refresh_token = login.body["data"]["refresh_token"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/session/refresh",
            Some(serde_json::json!({ "refresh_token": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body["data"]["access_token"].is_string());

    // An access token must not be accepted as a refresh token.
    let access_token = login.body["data"]["access_token"].as_str().unwrap();
    let response = app
        .request(
            "POST",
            "/api/session/refresh",
            Some(serde_json::json!({ "refresh_token": access_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/users/current", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
