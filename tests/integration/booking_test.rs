//! Integration tests for the booking endpoints and the availability
//! checker's conflict matrix.

use http::StatusCode;

use crate::helpers::{TestApp, days_from_now};

/// Owner + guest fixture: returns (owner token, guest token, spot id).
async fn spot_with_guest(app: &TestApp) -> (String, String, uuid::Uuid) {
    app.create_test_user("host", "correct-horse-battery").await;
    app.create_test_user("guest", "correct-horse-battery").await;
    let owner = app.login("host", "correct-horse-battery").await;
    let guest = app.login("guest", "correct-horse-battery").await;
    let spot = app.create_spot(&owner, "Conflict Cabin").await;
    (owner, guest, spot)
}

#[tokio::test]
async fn test_create_booking() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(10),
                "end_date": days_from_now(14),
            })),
            Some(&guest),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["data"]["start_date"], days_from_now(10));
    assert_eq!(response.body["data"]["end_date"], days_from_now(14));
}

#[tokio::test]
async fn test_boundary_touching_range_conflicts() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    app.create_test_user("rival", "correct-horse-battery").await;
    let rival = app.login("rival", "correct-horse-battery").await;

    // Starts on the existing booking's end date: closed intervals share
    // that day, so this is a conflict.
    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(14),
                "end_date": days_from_now(16),
            })),
            Some(&rival),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Spot is already booked for the specified dates"
    );
}

#[tokio::test]
async fn test_adjacent_range_does_not_conflict() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    app.create_test_user("rival", "correct-horse-battery").await;
    let rival = app.login("rival", "correct-horse-battery").await;

    // Starts the day after the existing booking ends: no shared day.
    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(15),
                "end_date": days_from_now(17),
            })),
            Some(&rival),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_contained_range_conflicts() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(20))
        .await;

    app.create_test_user("rival", "correct-horse-battery").await;
    let rival = app.login("rival", "correct-horse-battery").await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(12),
                "end_date": days_from_now(14),
            })),
            Some(&rival),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_same_dates_on_other_spot_do_not_conflict() {
    let app = TestApp::new().await;
    let (owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    let other_spot = app.create_spot(&owner, "Second Cabin").await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", other_spot),
            Some(serde_json::json!({
                "start_date": days_from_now(10),
                "end_date": days_from_now(14),
            })),
            Some(&guest),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
}

#[tokio::test]
async fn test_update_excludes_own_range() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    let booking = app
        .create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    // Shifting by two days overlaps only the booking's own stored range.
    let response = app
        .request(
            "PUT",
            &format!("/api/bookings/{}", booking),
            Some(serde_json::json!({
                "start_date": days_from_now(12),
                "end_date": days_from_now(16),
            })),
            Some(&guest),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["start_date"], days_from_now(12));
}

#[tokio::test]
async fn test_update_into_other_booking_conflicts() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    let booking = app
        .create_booking(&guest, spot, &days_from_now(10), &days_from_now(12))
        .await;

    app.create_test_user("rival", "correct-horse-battery").await;
    let rival = app.login("rival", "correct-horse-battery").await;
    app.create_booking(&rival, spot, &days_from_now(20), &days_from_now(24))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/bookings/{}", booking),
            Some(serde_json::json!({
                "start_date": days_from_now(18),
                "end_date": days_from_now(21),
            })),
            Some(&guest),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_cannot_book_own_spot() {
    let app = TestApp::new().await;
    let (owner, _guest, spot) = spot_with_guest(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(10),
                "end_date": days_from_now(14),
            })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "You cannot book your own spot");
}

#[tokio::test]
async fn test_booking_unknown_spot_is_404() {
    let app = TestApp::new().await;
    app.create_test_user("wanderer", "correct-horse-battery")
        .await;
    let token = app.login("wanderer", "correct-horse-battery").await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", uuid::Uuid::new_v4()),
            Some(serde_json::json!({
                "start_date": days_from_now(10),
                "end_date": days_from_now(14),
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_ranges_rejected() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;

    // End before start.
    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": days_from_now(14),
                "end_date": days_from_now(10),
            })),
            Some(&guest),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Start in the past.
    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": "2020-01-01",
                "end_date": "2020-01-05",
            })),
            Some(&guest),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Malformed date fails DTO deserialization before any service logic.
    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/bookings", spot),
            Some(serde_json::json!({
                "start_date": "not-a-date",
                "end_date": days_from_now(10),
            })),
            Some(&guest),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_only_author_can_edit_booking() {
    let app = TestApp::new().await;
    let (owner, guest, spot) = spot_with_guest(&app).await;
    let booking = app
        .create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/bookings/{}", booking),
            Some(serde_json::json!({
                "start_date": days_from_now(11),
                "end_date": days_from_now(15),
            })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_owner_sees_guests_others_see_periods() {
    let app = TestApp::new().await;
    let (owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/spots/{}/bookings", spot),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["guest"]["first_name"], "Test");

    app.create_test_user("onlooker", "correct-horse-battery")
        .await;
    let onlooker = app.login("onlooker", "correct-horse-battery").await;

    let response = app
        .request(
            "GET",
            &format!("/api/spots/{}/bookings", spot),
            None,
            Some(&onlooker),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert!(items[0].get("guest").is_none());
    assert!(items[0]["start_date"].is_string());
}

#[tokio::test]
async fn test_list_current_includes_spot_summary() {
    let app = TestApp::new().await;
    let (_owner, guest, spot) = spot_with_guest(&app).await;
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(14))
        .await;

    let response = app
        .request("GET", "/api/bookings/current", None, Some(&guest))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["spot"]["name"], "Conflict Cabin");
}

#[tokio::test]
async fn test_guest_or_owner_can_delete_booking() {
    let app = TestApp::new().await;
    let (owner, guest, spot) = spot_with_guest(&app).await;

    // Guest deletes their own booking.
    let booking = app
        .create_booking(&guest, spot, &days_from_now(10), &days_from_now(12))
        .await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookings/{}", booking),
            None,
            Some(&guest),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The freed range can be booked again.
    app.create_booking(&guest, spot, &days_from_now(10), &days_from_now(12))
        .await;

    // The spot owner can also remove a guest's booking.
    let booking = app
        .create_booking(&guest, spot, &days_from_now(20), &days_from_now(22))
        .await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookings/{}", booking),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // A third party cannot.
    app.create_test_user("meddler", "correct-horse-battery")
        .await;
    let meddler = app.login("meddler", "correct-horse-battery").await;
    let booking = app
        .create_booking(&guest, spot, &days_from_now(25), &days_from_now(26))
        .await;
    let response = app
        .request(
            "DELETE",
            &format!("/api/bookings/{}", booking),
            None,
            Some(&meddler),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
