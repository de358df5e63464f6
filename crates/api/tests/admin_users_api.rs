//! HTTP-level integration tests for `/admin/users`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, login, login_fallback, post_json, post_json_auth,
    put_json_auth, seed_admin_user,
};
use serde_json::json;

#[tokio::test]
async fn admin_can_create_user_without_exposing_the_hash() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/users",
        json!({ "email": " new@teamunited.org ", "password": "a-strong-password" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "new@teamunited.org");
    assert_eq!(json["data"]["is_admin"], true);
    assert!(json["data"].get("password_hash").is_none());
    assert!(json["data"].get("password").is_none());

    // The new account can log in.
    login(app.app(), "new@teamunited.org", "a-strong-password").await;
}

#[tokio::test]
async fn duplicate_email_is_409_and_nothing_is_written() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;
    seed_admin_user(&app, "ops@teamunited.org", "ops-password-123", true).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/users",
        json!({ "email": "ops@teamunited.org", "password": "another-password" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "An admin user with this email already exists");

    assert_eq!(app.backend.store.admin_user_count().await, 1);
}

#[tokio::test]
async fn weak_password_and_bad_email_are_rejected() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/users",
        json!({ "email": "short@teamunited.org", "password": "short" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = post_json_auth(
        app.app(),
        "/api/v1/admin/users",
        json!({ "email": "not-an-email", "password": "long-enough-password" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.backend.store.admin_user_count().await, 0);
}

#[tokio::test]
async fn editors_and_anonymous_callers_are_kept_out() {
    let app = common::build_test_app();
    seed_admin_user(&app, "editor@teamunited.org", "editor-password-1", false).await;
    let editor = login(app.app(), "editor@teamunited.org", "editor-password-1").await;

    assert_eq!(
        get(app.app(), "/api/v1/admin/users").await.status(),
        StatusCode::UNAUTHORIZED
    );
    let response = get_auth(app.app(), "/api/v1/admin/users", &editor).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    // Editors may still manage content.
    let response = post_json_auth(
        app.app(),
        "/api/v1/leaders",
        json!({
            "name": "Tunde Bakare",
            "role": "Programs Lead",
            "image_url": "https://images.example.org/tunde.jpg"
        }),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn password_change_takes_effect_and_blank_keeps_it() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;
    let user = seed_admin_user(&app, "ops@teamunited.org", "original-password", true).await;
    let uri = format!("/api/v1/admin/users/{}", user.id);

    let response = put_json_auth(
        app.app(),
        &uri,
        json!({ "password": "", "is_admin": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_admin"], false);
    login(app.app(), "ops@teamunited.org", "original-password").await;

    let response = put_json_auth(
        app.app(),
        &uri,
        json!({ "password": "replacement-password" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    login(app.app(), "ops@teamunited.org", "replacement-password").await;

    let response = post_json(
        app.app(),
        "/api/v1/auth/login",
        json!({ "identifier": "ops@teamunited.org", "password": "original-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn email_change_to_taken_address_is_409() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;
    seed_admin_user(&app, "a@teamunited.org", "password-aaaaaa", true).await;
    let b = seed_admin_user(&app, "b@teamunited.org", "password-bbbbbb", true).await;

    let response = put_json_auth(
        app.app(),
        &format!("/api/v1/admin/users/{}", b.id),
        json!({ "email": "a@teamunited.org" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_of_missing_user_is_404() {
    let app = common::build_test_app();
    let token = login_fallback(app.app()).await;
    let response = put_json_auth(
        app.app(),
        "/api/v1/admin/users/404",
        json!({ "is_admin": false }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_ends_their_sessions() {
    let app = common::build_test_app();
    let admin = login_fallback(app.app()).await;
    let user = seed_admin_user(&app, "leaving@teamunited.org", "leaving-password", false).await;
    let their_token = login(app.app(), "leaving@teamunited.org", "leaving-password").await;

    let uri = format!("/api/v1/admin/users/{}", user.id);
    assert_eq!(delete_auth(app.app(), &uri, &admin).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete_auth(app.app(), &uri, &admin).await.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.app(), "/api/v1/auth/session", &their_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(get_auth(app.app(), "/api/v1/admin/users", &admin).await).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn demotion_ends_the_users_open_sessions() {
    let app = common::build_test_app();
    let admin = login_fallback(app.app()).await;
    let ops = seed_admin_user(&app, "ops@teamunited.org", "ops-password-123", true).await;
    let ops_token = login(app.app(), "ops@teamunited.org", "ops-password-123").await;
    assert_eq!(
        get_auth(app.app(), "/api/v1/admin/users", &ops_token).await.status(),
        StatusCode::OK
    );

    let response = put_json_auth(
        app.app(),
        &format!("/api/v1/admin/users/{}", ops.id),
        json!({ "is_admin": false, "password": "brand-new-password" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.app(), "/api/v1/admin/users", &ops_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A fresh login carries the new role.
    let token = login(app.app(), "ops@teamunited.org", "brand-new-password").await;
    let response = get_auth(app.app(), "/api/v1/admin/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn email_only_change_keeps_sessions() {
    let app = common::build_test_app();
    let admin = login_fallback(app.app()).await;
    let ops = seed_admin_user(&app, "ops@teamunited.org", "ops-password-123", true).await;
    let ops_token = login(app.app(), "ops@teamunited.org", "ops-password-123").await;

    let response = put_json_auth(
        app.app(),
        &format!("/api/v1/admin/users/{}", ops.id),
        json!({ "email": "operations@teamunited.org", "is_admin": true, "password": "" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app.app(), "/api/v1/admin/users", &ops_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
