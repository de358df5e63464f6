//! HTTP-level integration tests for login, logout and session checks.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, login, login_fallback, post_auth, post_json, post_json_auth,
    project_body, seed_admin_user, FALLBACK_PASSWORD, FALLBACK_USERNAME,
};
use serde_json::json;

async fn attempt(app: &common::TestApp, identifier: &str, password: &str) -> axum::response::Response {
    post_json(
        app.app(),
        "/api/v1/auth/login",
        json!({ "identifier": identifier, "password": password }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fallback_credentials_log_in_as_admin() {
    let app = common::build_test_app();
    let response = attempt(&app, FALLBACK_USERNAME, FALLBACK_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["expires_in"], 3600);
    assert_eq!(json["data"]["principal"]["identifier"], "admin");
    assert_eq!(json["data"]["principal"]["role"], "admin");
    assert_eq!(json["data"]["principal"]["method"], "fallback");
}

#[tokio::test]
async fn account_login_uses_the_stored_role() {
    let app = common::build_test_app();
    seed_admin_user(&app, "editor@teamunited.org", "editor-password-1", false).await;

    let response = post_json(
        app.app(),
        "/api/v1/auth/login",
        json!({ "email": "editor@teamunited.org", "password": "editor-password-1" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["principal"]["role"], "editor");
    assert_eq!(json["data"]["principal"]["method"], "account");
}

#[tokio::test]
async fn failures_share_one_generic_response() {
    let app = common::build_test_app();
    seed_admin_user(&app, "ops@teamunited.org", "ops-password-123", true).await;

    let wrong_password = attempt(&app, "ops@teamunited.org", "nope-nope-nope").await;
    let unknown_user = attempt(&app, "ghost@teamunited.org", "whatever-123").await;
    let wrong_fallback = attempt(&app, FALLBACK_USERNAME, "teamunited2023").await;

    let mut bodies = Vec::new();
    for response in [wrong_password, unknown_user, wrong_fallback] {
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(body_json(response).await);
    }
    assert_eq!(bodies[0]["code"], "UNAUTHORIZED");
    assert_eq!(bodies[0]["error"], "Invalid email or password");
    assert!(bodies.iter().all(|b| *b == bodies[0]));
}

#[tokio::test]
async fn identifiers_match_exactly() {
    let app = common::build_test_app();
    seed_admin_user(&app, "ops@teamunited.org", "ops-password-123", true).await;

    for identifier in [" ops@teamunited.org", "OPS@teamunited.org", " admin "] {
        let password = if identifier.to_lowercase().contains("ops") { "ops-password-123" } else { FALLBACK_PASSWORD };
        let response = attempt(&app, identifier, password).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{identifier:?}");
    }
}

#[tokio::test]
async fn fallback_is_disabled_when_unconfigured() {
    let mut config = common::test_config();
    config.fallback = None;
    let app = common::build_test_app_with(config);

    let response = attempt(&app, FALLBACK_USERNAME, FALLBACK_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn account_wins_over_fallback_with_same_identifier() {
    let app = common::build_test_app();
    seed_admin_user(&app, "admin", "account-password", false).await;

    // The account's own password gives the account's role.
    let token = login(app.app(), "admin", "account-password").await;
    let json = body_json(get_auth(app.app(), "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["role"], "editor");

    // The fallback password still opens the fallback path.
    let token = login_fallback(app.app()).await;
    let json = body_json(get_auth(app.app(), "/api/v1/auth/session", &token).await).await;
    assert_eq!(json["data"]["role"], "admin");
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn session_reports_the_principal() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;

    let response = get_auth(app.app(), "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["identifier"], "admin");
    assert_eq!(json["data"]["is_admin"], true);
    assert_eq!(json["data"]["method"], "fallback");
}

#[tokio::test]
async fn missing_or_forged_tokens_are_rejected() {
    let app = common::build_test_app();

    let response = get(app.app(), "/api/v1/auth/session").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app.app(), "/api/v1/auth/session", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Signed with a different secret.
    let mut other = common::test_config();
    other.jwt.secret = "some-other-secret-entirely".into();
    let other_app = common::build_test_app_with(other);
    let foreign = login_fallback(other_app.app()).await;
    let response = get_auth(app.app(), "/api/v1/auth/session", &foreign).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;

    let response = post_auth(app.app(), "/api/v1/auth/logout", &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.app(), "/api/v1/auth/session", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json_auth(
        app.app(),
        "/api/v1/projects",
        project_body("After Logout", "Education"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(app.backend.projects.is_empty().await);
}

#[tokio::test]
async fn logout_only_ends_its_own_session() {
    let app = common::build_test_app();
    let first = login_fallback(app.app()).await;
    let second = login_fallback(app.app()).await;

    post_auth(app.app(), "/api/v1/auth/logout", &first).await;

    let response = get_auth(app.app(), "/api/v1/auth/session", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_always_succeeds() {
    let app = common::build_test_app();

    let response = post_json(app.app(), "/api/v1/auth/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_auth(app.app(), "/api/v1/auth/logout", "garbage").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
