//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use notes_server::{api, services::AuthService, state::AppState};
use notes_storage::Database;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";

/// Lowest cost the server accepts, to keep the suite fast
pub const TEST_BCRYPT_COST: u32 = 10;

/// Test user credentials
pub mod fixtures {
    pub const TEST_EMAIL: &str = "a@x.com";
    pub const TEST_PASSWORD: &str = "password123";

    pub const OTHER_EMAIL: &str = "b@x.com";
    pub const OTHER_PASSWORD: &str = "hunter22secret";
}

/// Router plus the state behind it, on a real temporary SQLite file
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

pub fn create_test_auth_service() -> AuthService {
    AuthService::new(TEST_SECRET.to_string(), 1, 1, TEST_BCRYPT_COST)
}

/// Create a test database with migrations applied
pub async fn create_test_database() -> (Arc<Database>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!("sqlite://{}", temp_dir.path().join("test.db").display());
    let db = Database::connect(&db_url, 5).await.unwrap();
    (Arc::new(db), temp_dir)
}

impl TestApp {
    pub async fn new() -> Self {
        let (db, temp_dir) = create_test_database().await;
        let state = AppState::new(db, Arc::new(create_test_auth_service()));

        Self {
            router: api::router(state.clone()),
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Send one request through a clone of the router
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn post(&self, path: &str, body: Value, token: Option<&str>) -> (StatusCode, Value) {
        self.send(post_request(path, &body, token)).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(get_request(path, token)).await
    }

    pub async fn register(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/registration.registerUser",
            serde_json::json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/api/auth.login",
            serde_json::json!({ "email": email, "password": password }),
            None,
        )
        .await
    }

    /// Register then log in, returning the access token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        let (status, _) = self.register(email, password).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self.login(email, password).await;
        assert_eq!(status, StatusCode::OK);

        body["access_token"].as_str().unwrap().to_string()
    }

    pub async fn create_note(&self, token: &str, title: &str, content: &str) -> (StatusCode, Value) {
        self.post(
            "/api/note.createNote",
            serde_json::json!({ "title": title, "content": content }),
            Some(token),
        )
        .await
    }
}

pub fn post_request(path: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(path)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path).method("GET");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
