//! Integration tests for spot CRUD, images, and aggregates.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_spot_crud_roundtrip() {
    let app = TestApp::new().await;
    app.create_test_user("landlord", "correct-horse-battery")
        .await;
    let token = app.login("landlord", "correct-horse-battery").await;

    let spot = app.create_spot(&token, "Lakeside Hut").await;

    let response = app
        .request("GET", &format!("/api/spots/{}", spot), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "Lakeside Hut");
    assert_eq!(response.body["data"]["num_reviews"], 0);
    assert!(response.body["data"]["avg_star_rating"].is_null());
    assert_eq!(response.body["data"]["owner"]["first_name"], "Test");

    let response = app
        .request(
            "PUT",
            &format!("/api/spots/{}", spot),
            Some(serde_json::json!({ "price": 200.0, "city": "Newtown" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["price"], 200.0);
    assert_eq!(response.body["data"]["city"], "Newtown");
    // Untouched fields keep their values.
    assert_eq!(response.body["data"]["name"], "Lakeside Hut");

    let response = app
        .request("DELETE", &format!("/api/spots/{}", spot), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/spots/{}", spot), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_spot_list_is_public_and_paginated() {
    let app = TestApp::new().await;
    app.create_test_user("lister", "correct-horse-battery").await;
    let token = app.login("lister", "correct-horse-battery").await;

    for i in 0..3 {
        app.create_spot(&token, &format!("Spot {}", i)).await;
    }

    let response = app
        .request("GET", "/api/spots?page=1&per_page=2", None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(response.body["data"]["total_items"], 3);
    assert_eq!(response.body["data"]["total_pages"], 2);
    assert_eq!(response.body["data"]["has_next"], true);
}

#[tokio::test]
async fn test_spots_current_lists_only_owned() {
    let app = TestApp::new().await;
    app.create_test_user("owner-a", "correct-horse-battery").await;
    app.create_test_user("owner-b", "correct-horse-battery").await;
    let a = app.login("owner-a", "correct-horse-battery").await;
    let b = app.login("owner-b", "correct-horse-battery").await;

    app.create_spot(&a, "A's Place").await;
    app.create_spot(&b, "B's Place").await;

    let response = app.request("GET", "/api/spots/current", None, Some(&a)).await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "A's Place");
}

#[tokio::test]
async fn test_only_owner_may_modify_spot() {
    let app = TestApp::new().await;
    app.create_test_user("owner", "correct-horse-battery").await;
    app.create_test_user("intruder", "correct-horse-battery").await;
    let owner = app.login("owner", "correct-horse-battery").await;
    let intruder = app.login("intruder", "correct-horse-battery").await;

    let spot = app.create_spot(&owner, "Guarded House").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/spots/{}", spot),
            Some(serde_json::json!({ "price": 1.0 })),
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/spots/{}", spot),
            None,
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_spot_requires_auth_and_valid_body() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/spots",
            Some(serde_json::json!({
                "address": "1 Test Lane",
                "city": "Testville",
                "state": "TS",
                "country": "Testland",
                "lat": 45.0,
                "lng": -122.0,
                "name": "No Auth",
                "description": "desc",
                "price": 10.0,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    app.create_test_user("builder", "correct-horse-battery").await;
    let token = app.login("builder", "correct-horse-battery").await;

    let response = app
        .request(
            "POST",
            "/api/spots",
            Some(serde_json::json!({
                "address": "1 Test Lane",
                "city": "Testville",
                "state": "TS",
                "country": "Testland",
                "lat": 300.0,
                "lng": -122.0,
                "name": "Bad Latitude",
                "description": "desc",
                "price": 10.0,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_preview_image_and_rating_aggregates() {
    let app = TestApp::new().await;
    app.create_test_user("aggregator", "correct-horse-battery")
        .await;
    app.create_test_user("visitor", "correct-horse-battery").await;
    let owner = app.login("aggregator", "correct-horse-battery").await;
    let visitor = app.login("visitor", "correct-horse-battery").await;

    let spot = app.create_spot(&owner, "Rated Retreat").await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/images", spot),
            Some(serde_json::json!({
                "url": "https://images.example.com/retreat.jpg",
                "preview": true,
            })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Lovely", "stars": 4 })),
            Some(&visitor),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let response = app.request("GET", "/api/spots", None, None).await;
    let items = response.body["data"]["items"].as_array().unwrap();
    let listed = items.iter().find(|s| s["name"] == "Rated Retreat").unwrap();
    assert_eq!(listed["avg_rating"], 4.0);
    assert_eq!(
        listed["preview_image"],
        "https://images.example.com/retreat.jpg"
    );

    let response = app
        .request("GET", &format!("/api/spots/{}", spot), None, None)
        .await;
    assert_eq!(response.body["data"]["num_reviews"], 1);
    assert_eq!(response.body["data"]["avg_star_rating"], 4.0);
    assert_eq!(response.body["data"]["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_new_preview_demotes_old_one() {
    let app = TestApp::new().await;
    app.create_test_user("photographer", "correct-horse-battery")
        .await;
    let token = app.login("photographer", "correct-horse-battery").await;
    let spot = app.create_spot(&token, "Photo House").await;

    for url in ["https://img.example.com/a.jpg", "https://img.example.com/b.jpg"] {
        let response = app
            .request(
                "POST",
                &format!("/api/spots/{}/images", spot),
                Some(serde_json::json!({ "url": url, "preview": true })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    // The later preview wins; the listing shows exactly one.
    let response = app.request("GET", "/api/spots", None, None).await;
    let items = response.body["data"]["items"].as_array().unwrap();
    let listed = items.iter().find(|s| s["name"] == "Photo House").unwrap();
    assert_eq!(listed["preview_image"], "https://img.example.com/b.jpg");

    let response = app
        .request("GET", &format!("/api/spots/{}", spot), None, None)
        .await;
    let previews: Vec<_> = response.body["data"]["images"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["preview"] == true)
        .collect();
    assert_eq!(previews.len(), 1);
}

#[tokio::test]
async fn test_delete_spot_cascades_bookings() {
    let app = TestApp::new().await;
    app.create_test_user("demolisher", "correct-horse-battery")
        .await;
    app.create_test_user("squatter", "correct-horse-battery").await;
    let owner = app.login("demolisher", "correct-horse-battery").await;
    let guest = app.login("squatter", "correct-horse-battery").await;

    let spot = app.create_spot(&owner, "Doomed Cabin").await;
    app.create_booking(
        &guest,
        spot,
        &crate::helpers::days_from_now(10),
        &crate::helpers::days_from_now(12),
    )
    .await;

    let response = app
        .request("DELETE", &format!("/api/spots/{}", spot), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/bookings/current", None, Some(&guest))
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}
