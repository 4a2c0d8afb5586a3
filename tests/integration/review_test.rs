//! Integration tests for reviews and review images.

use http::StatusCode;

use crate::helpers::TestApp;

/// Owner + reviewer fixture: returns (owner token, reviewer token, spot id).
async fn spot_with_reviewer(app: &TestApp) -> (String, String, uuid::Uuid) {
    app.create_test_user("innkeeper", "correct-horse-battery")
        .await;
    app.create_test_user("critic", "correct-horse-battery").await;
    let owner = app.login("innkeeper", "correct-horse-battery").await;
    let critic = app.login("critic", "correct-horse-battery").await;
    let spot = app.create_spot(&owner, "Reviewed Inn").await;
    (owner, critic, spot)
}

#[tokio::test]
async fn test_create_and_list_reviews() {
    let app = TestApp::new().await;
    let (_owner, critic, spot) = spot_with_reviewer(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Quiet and clean", "stars": 5 })),
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    // Public spot review list carries the reviewer's name.
    let response = app
        .request("GET", &format!("/api/spots/{}/reviews", spot), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["review"], "Quiet and clean");
    assert_eq!(items[0]["user"]["first_name"], "Test");

    // The author's own list carries the spot summary.
    let response = app
        .request("GET", "/api/reviews/current", None, Some(&critic))
        .await;
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["spot"]["name"], "Reviewed Inn");
}

#[tokio::test]
async fn test_second_review_of_same_spot_conflicts() {
    let app = TestApp::new().await;
    let (_owner, critic, spot) = spot_with_reviewer(&app).await;

    for (status, stars) in [(StatusCode::CREATED, 4), (StatusCode::CONFLICT, 2)] {
        let response = app
            .request(
                "POST",
                &format!("/api/spots/{}/reviews", spot),
                Some(serde_json::json!({ "review": "Again?", "stars": stars })),
                Some(&critic),
            )
            .await;
        assert_eq!(response.status, status, "{:?}", response.body);
    }
}

#[tokio::test]
async fn test_owner_cannot_review_own_spot() {
    let app = TestApp::new().await;
    let (owner, _critic, spot) = spot_with_reviewer(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Five stars, obviously", "stars": 5 })),
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_stars_out_of_range_rejected() {
    let app = TestApp::new().await;
    let (_owner, critic, spot) = spot_with_reviewer(&app).await;

    for stars in [0, 6] {
        let response = app
            .request(
                "POST",
                &format!("/api/spots/{}/reviews", spot),
                Some(serde_json::json!({ "review": "Broken stars", "stars": stars })),
                Some(&critic),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_review_of_unknown_spot_is_404() {
    let app = TestApp::new().await;
    app.create_test_user("lost", "correct-horse-battery").await;
    let token = app.login("lost", "correct-horse-battery").await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", uuid::Uuid::new_v4()),
            Some(serde_json::json!({ "review": "Where am I", "stars": 3 })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_only_author_may_edit_or_delete() {
    let app = TestApp::new().await;
    let (owner, critic, spot) = spot_with_reviewer(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Initial take", "stars": 3 })),
            Some(&critic),
        )
        .await;
    let review_id = response.body["data"]["id"].as_str().unwrap().to_string();

    // The spot owner is not the author.
    let response = app
        .request(
            "PUT",
            &format!("/api/reviews/{}", review_id),
            Some(serde_json::json!({ "stars": 5 })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // The author can revise their rating.
    let response = app
        .request(
            "PUT",
            &format!("/api/reviews/{}", review_id),
            Some(serde_json::json!({ "stars": 4 })),
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["stars"], 4);
    assert_eq!(response.body["data"]["review"], "Initial take");

    let response = app
        .request(
            "DELETE",
            &format!("/api/reviews/{}", review_id),
            None,
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/spots/{}/reviews", spot), None, None)
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_review_image_cap() {
    let app = TestApp::new().await;
    let (_owner, critic, spot) = spot_with_reviewer(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Photogenic", "stars": 5 })),
            Some(&critic),
        )
        .await;
    let review_id = response.body["data"]["id"].as_str().unwrap().to_string();

    for i in 0..10 {
        let response = app
            .request(
                "POST",
                &format!("/api/reviews/{}/images", review_id),
                Some(serde_json::json!({
                    "url": format!("https://img.example.com/photo-{}.jpg", i),
                })),
                Some(&critic),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "image {}", i);
    }

    // The eleventh image is over the cap.
    let response = app
        .request(
            "POST",
            &format!("/api/reviews/{}/images", review_id),
            Some(serde_json::json!({ "url": "https://img.example.com/too-many.jpg" })),
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Images appear in the spot's review list.
    let response = app
        .request("GET", &format!("/api/spots/{}/reviews", spot), None, None)
        .await;
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items[0]["images"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_only_author_manages_review_images() {
    let app = TestApp::new().await;
    let (owner, critic, spot) = spot_with_reviewer(&app).await;

    let response = app
        .request(
            "POST",
            &format!("/api/spots/{}/reviews", spot),
            Some(serde_json::json!({ "review": "Mine", "stars": 4 })),
            Some(&critic),
        )
        .await;
    let review_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            &format!("/api/reviews/{}/images", review_id),
            Some(serde_json::json!({ "url": "https://img.example.com/not-yours.jpg" })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/reviews/{}/images", review_id),
            Some(serde_json::json!({ "url": "https://img.example.com/mine.jpg" })),
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let image_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/review-images/{}", image_id),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "DELETE",
            &format!("/api/review-images/{}", image_id),
            None,
            Some(&critic),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
