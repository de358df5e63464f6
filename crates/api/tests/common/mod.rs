#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use teamunited_api::auth::jwt::JwtConfig;
use teamunited_api::auth::password::hash_password;
use teamunited_api::config::{FallbackCredentials, ServerConfig, StoreBackend};
use teamunited_api::router::build_app_router;
use teamunited_api::state::AppState;
use teamunited_db::models::admin_user::{AdminUserRow, CreateAdminUser};
use teamunited_db::store::memory::MemoryBackend;
use teamunited_db::store::ContentStore;

pub const FALLBACK_USERNAME: &str = "admin";
pub const FALLBACK_PASSWORD: &str = "teamunited2024";

/// A router over a fresh in-memory store, plus handles into that store.
pub struct TestApp {
    pub router: Router,
    pub backend: MemoryBackend,
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }
}

/// Build a test `ServerConfig` with safe defaults and the fallback login.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            session_expiry_mins: 60,
        },
        fallback: Some(
            FallbackCredentials::new(FALLBACK_USERNAME, FALLBACK_PASSWORD)
                .expect("hashing should succeed"),
        ),
    }
}

/// Build the full application router over an in-memory Content Store.
pub fn build_test_app() -> TestApp {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> TestApp {
    let backend = MemoryBackend::default();
    let state = AppState {
        store: ContentStore::from_memory(backend.clone()),
        config: Arc::new(config.clone()),
    };
    TestApp {
        router: build_app_router(state, &config),
        backend,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Log in via the API and return the session token.
pub async fn login(app: Router, identifier: &str, password: &str) -> String {
    let body = json!({ "identifier": identifier, "password": password });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"]["token"]
        .as_str()
        .expect("token must be a string")
        .to_string()
}

pub async fn login_fallback(app: Router) -> String {
    login(app, FALLBACK_USERNAME, FALLBACK_PASSWORD).await
}

/// Insert an admin user straight into the store.
pub async fn seed_admin_user(
    test_app: &TestApp,
    email: &str,
    password: &str,
    is_admin: bool,
) -> AdminUserRow {
    use teamunited_db::store::AdminUserStore;

    test_app
        .backend
        .store
        .create(&CreateAdminUser {
            email: email.to_string(),
            password_hash: hash_password(password).expect("hashing should succeed"),
            is_admin,
        })
        .await
        .expect("seeding admin user should succeed")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn project_body(title: &str, category: &str) -> Value {
    json!({
        "title": title,
        "location": "Kano, Nigeria",
        "category": category,
        "status": "Ongoing",
        "date": "2026-03-01",
        "image_url": "https://images.example.org/project.jpg",
        "description": "Boreholes for three villages."
    })
}
