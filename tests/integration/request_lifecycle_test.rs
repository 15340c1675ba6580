//! Integration tests for the help request lifecycle over HTTP.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helphub_entity::user::UserRole;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/api/requests", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");

    let response = app
        .request("GET", "/api/requests", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_removed_user_is_unauthorized() {
    let app = helpers::TestApp::new();
    let gone = app.create_test_user("gone", UserRole::Member);
    app.users.remove(gone.id());

    let response = app
        .request("GET", "/api/requests", None, Some(&gone.token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_groceries_scenario() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);
    let volunteer = app.create_test_user("maria", UserRole::Member);

    let id = app.create_groceries_request(&poster).await;
    let response = app
        .request("GET", &format!("/api/requests/{id}"), None, Some(&poster.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "WAITING");
    assert!(response.body["data"]["volunteer_id"].is_null());

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/accept"),
            Some(json!({ "volunteer_id": volunteer.id() })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["status"], "ACCEPTING");
    assert_eq!(
        response.body["data"]["volunteer_id"],
        json!(volunteer.id())
    );

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/complete"),
            None,
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "COMPLETED");

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/complete"),
            None,
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "INVALID_STATE");

    let response = app
        .request("GET", "/api/notifications", None, Some(&poster.token))
        .await;
    let kinds: Vec<&str> = response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["COMPLETED", "ACCEPTING"]);
}

#[tokio::test]
async fn test_create_validates_body() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);

    let response = app
        .request(
            "POST",
            "/api/requests",
            Some(json!({
                "title": "",
                "description": "Elderly neighbor",
                "emergency_level": "LOW",
            })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/requests",
            Some(json!({ "title": "Need groceries" })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_delete_authorization() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);
    let other = app.create_test_user("ivan", UserRole::Member);
    let admin = app.create_test_user("root", UserRole::Admin);

    let first = app.create_groceries_request(&poster).await;
    let second = app.create_groceries_request(&poster).await;

    let response = app
        .request("DELETE", &format!("/api/requests/{first}"), None, Some(&other.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/requests/{first}"), None, Some(&poster.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("DELETE", &format!("/api/requests/{second}"), None, Some(&admin.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/requests/{first}"), None, Some(&poster.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_merges_present_fields_only() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);
    let id = app.create_groceries_request(&poster).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "location": "Block C", "emergency_level": "HIGH" })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["title"], "Need groceries");
    assert_eq!(response.body["data"]["location"], "Block C");
    assert_eq!(response.body["data"]["emergency_level"], "HIGH");

    let before = response.body["data"].clone();
    let response = app
        .request("PUT", &format!("/api/requests/{id}"), Some(json!({})), Some(&poster.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], before);

    let response = app
        .request(
            "PUT",
            &format!("/api/requests/{id}"),
            Some(json!({ "status": "COMPLETED" })),
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_is_open_to_members_and_filters_by_status() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);
    let volunteer = app.create_test_user("maria", UserRole::Member);
    let browser = app.create_test_user("ivan", UserRole::Member);

    let first = app.create_groceries_request(&poster).await;
    let second = app.create_groceries_request(&poster).await;
    app.request(
        "POST",
        &format!("/api/requests/{first}/accept"),
        Some(json!({ "volunteer_id": volunteer.id() })),
        Some(&poster.token),
    )
    .await;

    let response = app
        .request("GET", "/api/requests", None, Some(&browser.token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);

    let response = app
        .request("GET", "/api/requests?status=WAITING", None, Some(&browser.token))
        .await;
    let waiting = response.body["data"].as_array().unwrap();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0]["id"], second.as_str());
}

#[tokio::test]
async fn test_volunteer_cancel_and_withdraw() {
    let app = helpers::TestApp::new();
    let poster = app.create_test_user("olga", UserRole::Member);
    let volunteer = app.create_test_user("maria", UserRole::Member);
    let id = app.create_groceries_request(&poster).await;

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/volunteer"),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "VOLUNTEERED");

    app.request(
        "POST",
        &format!("/api/requests/{id}/accept"),
        Some(json!({ "volunteer_id": volunteer.id() })),
        Some(&poster.token),
    )
    .await;

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/withdraw"),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "WAITING");
    assert!(response.body["data"]["volunteer_id"].is_null());

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/cancel"),
            None,
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    app.request(
        "POST",
        &format!("/api/requests/{id}/accept"),
        Some(json!({ "volunteer_id": volunteer.id() })),
        Some(&poster.token),
    )
    .await;
    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/cancel"),
            None,
            Some(&volunteer.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/requests/{id}/cancel"),
            None,
            Some(&poster.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "CANCELLED");
    assert!(response.body["data"]["volunteer_id"].is_null());
}

#[tokio::test]
async fn test_unknown_request_is_not_found() {
    let app = helpers::TestApp::new();
    let user = app.create_test_user("olga", UserRole::Member);
    let missing = helphub_core::types::RequestId::new();

    let response = app
        .request("GET", &format!("/api/requests/{missing}"), None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_id_gets_json_error_body() {
    let app = helpers::TestApp::new();
    let user = app.create_test_user("olga", UserRole::Member);

    let response = app
        .request("GET", "/api/requests/not-a-uuid", None, Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let response = app
        .request(
            "PUT",
            "/api/notifications/12345/read",
            None,
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
