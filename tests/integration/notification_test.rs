//! Integration tests for the notification endpoints.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helphub_entity::user::UserRole;

async fn accepted_request(app: &helpers::TestApp) -> (helpers::TestUser, helpers::TestUser) {
    let poster = app.create_test_user("olga", UserRole::Member);
    let volunteer = app.create_test_user("maria", UserRole::Member);
    let id = app.create_groceries_request(&poster).await;
    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/accept"),
            Some(json!({ "volunteer_id": volunteer.id() })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    (poster, volunteer)
}

#[tokio::test]
async fn test_mark_all_read_with_zero_unread_is_noop() {
    let app = helpers::TestApp::new();
    let user = app.create_test_user("olga", UserRole::Member);

    let response = app
        .request("PUT", "/api/notifications/read-all", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["marked"], 0);

    let response = app
        .request("GET", "/api/notifications/unread", None, Some(&user.token))
        .await;
    assert_eq!(response.body["data"]["has_unread"], false);
    assert_eq!(response.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_accept_notifies_both_sides_with_usernames() {
    let app = helpers::TestApp::new();
    let (poster, volunteer) = accepted_request(&app).await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&poster.token))
        .await;
    let to_poster = response.body["data"].as_array().unwrap();
    assert_eq!(to_poster.len(), 1);
    assert_eq!(to_poster[0]["kind"], "ACCEPTING");
    assert_eq!(to_poster[0]["related_username"], "maria");
    assert_eq!(to_poster[0]["is_read"], false);

    let response = app
        .request("GET", "/api/notifications", None, Some(&volunteer.token))
        .await;
    let to_volunteer = response.body["data"].as_array().unwrap();
    assert_eq!(to_volunteer.len(), 1);
    assert_eq!(to_volunteer[0]["kind"], "ACCEPTED");
    assert_eq!(to_volunteer[0]["related_username"], "olga");
}

#[tokio::test]
async fn test_mark_all_read_clears_unread() {
    let app = helpers::TestApp::new();
    let (poster, volunteer) = accepted_request(&app).await;

    let response = app
        .request("GET", "/api/notifications/unread", None, Some(&poster.token))
        .await;
    assert_eq!(response.body["data"]["has_unread"], true);
    assert_eq!(response.body["data"]["count"], 1);

    let response = app
        .request("PUT", "/api/notifications/read-all", None, Some(&poster.token))
        .await;
    assert_eq!(response.body["data"]["marked"], 1);

    let response = app
        .request("GET", "/api/notifications/unread", None, Some(&poster.token))
        .await;
    assert_eq!(response.body["data"]["has_unread"], false);

    let response = app
        .request("GET", "/api/notifications/unread", None, Some(&volunteer.token))
        .await;
    assert_eq!(response.body["data"]["has_unread"], true);
}

#[tokio::test]
async fn test_mark_one_read() {
    let app = helpers::TestApp::new();
    let (poster, volunteer) = accepted_request(&app).await;

    let response = app
        .request("GET", "/api/notifications", None, Some(&poster.token))
        .await;
    let id = response.body["data"][0]["id"].as_str().unwrap().to_string();
    let path = format!("/api/notifications/{id}/read");

    let response = app.request("PUT", &path, None, Some(&volunteer.token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("PUT", &path, None, Some(&poster.token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let response = app.request("PUT", &path, None, Some(&poster.token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/notifications/unread", None, Some(&poster.token))
        .await;
    assert_eq!(response.body["data"]["has_unread"], false);

    let missing = helphub_core::types::NotificationId::new();
    let response = app
        .request(
            "PUT",
            &format!("/api/notifications/{missing}/read"),
            None,
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
