//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use helphub_auth::{JwtDecoder, JwtEncoder, JwtIdentityResolver, RbacEnforcer};
use helphub_core::config::AppConfig;
use helphub_core::types::UserId;
use helphub_database::memory::{MemoryNotificationStore, MemoryRequestStore, MemoryUserDirectory};
use helphub_entity::user::{UserIdentity, UserRole};
use helphub_service::{NotificationService, RequestService};

const TEST_CONFIG: &str = r#"
[database]
url = "postgres://unused"

[auth]
jwt_secret = "integration-test-secret"
"#;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// User directory behind the identity resolver
    pub users: MemoryUserDirectory,
    /// Signs session tokens for test users
    pub encoder: JwtEncoder,
}

/// A registered user and a valid session token for it.
pub struct TestUser {
    pub identity: UserIdentity,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> UserId {
        self.identity.id
    }
}

impl TestApp {
    /// Create a new test application backed by in-memory stores
    pub fn new() -> Self {
        let config = AppConfig::from_toml(TEST_CONFIG).expect("Failed to parse test config");

        let users = MemoryUserDirectory::new();
        let directory = Arc::new(users.clone());
        let rbac = RbacEnforcer::new();

        let notification_service =
            NotificationService::new(Arc::new(MemoryNotificationStore::new()), rbac.clone());
        let request_service = RequestService::new(
            Arc::new(MemoryRequestStore::new()),
            directory.clone(),
            notification_service.clone(),
            rbac,
        );

        let state = helphub_api::AppState {
            config: Arc::new(config.clone()),
            resolver: Arc::new(JwtIdentityResolver::new(
                JwtDecoder::new(&config.auth),
                directory,
            )),
            request_service: Arc::new(request_service),
            notification_service: Arc::new(notification_service),
        };

        Self {
            router: helphub_api::build_app(state),
            users,
            encoder: JwtEncoder::new(&config.auth),
        }
    }

    /// Register a user and issue a token for it
    pub fn create_test_user(&self, username: &str, role: UserRole) -> TestUser {
        let identity = UserIdentity::new(UserId::new(), username, role);
        self.users.insert(identity.clone());
        let token = self
            .encoder
            .issue(&identity)
            .expect("Failed to issue token");
        TestUser { identity, token }
    }

    /// Post the groceries request as `poster` and return its id
    pub async fn create_groceries_request(&self, poster: &TestUser) -> String {
        let response = self
            .request(
                "POST",
                "/api/requests",
                Some(serde_json::json!({
                    "title": "Need groceries",
                    "description": "Elderly neighbor",
                    "emergency_level": "LOW",
                })),
                Some(&poster.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
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
