//! The authoring client against a live API server on a loopback port.

use std::sync::Arc;

use assert_matches::assert_matches;
use teamunited_admin::{AdminError, ApiClient, ClientState, Editor};
use teamunited_api::auth::jwt::JwtConfig;
use teamunited_api::config::{FallbackCredentials, ServerConfig, StoreBackend};
use teamunited_api::router::build_app_router;
use teamunited_api::state::AppState;
use teamunited_core::error::CoreError;
use teamunited_core::gate::AuthMethod;
use teamunited_core::listing::ListQuery;
use teamunited_db::models::gallery::{CreateGalleryItem, GalleryItem};
use teamunited_db::models::admin_user::{AdminUser, NewAdminUser};
use teamunited_db::models::project::Project;
use teamunited_db::store::memory::MemoryBackend;
use teamunited_db::store::{ContentStore, StoreError, Table};

const USERNAME: &str = "admin";
const PASSWORD: &str = "teamunited2024";

/// Serve the API over an in-memory store; returns the base URL.
async fn spawn_server() -> (String, MemoryBackend) {
    let config = ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".into()],
        request_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: "admin-client-test-secret".into(),
            session_expiry_mins: 60,
        },
        fallback: Some(FallbackCredentials::new(USERNAME, PASSWORD).unwrap()),
    };
    let backend = MemoryBackend::default();
    let state = AppState {
        store: ContentStore::from_memory(backend.clone()),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

#[tokio::test]
async fn login_edit_and_logout_round_trip() {
    let (url, backend) = spawn_server().await;
    let mut client = ApiClient::new(&url);

    let principal = client.login(USERNAME, PASSWORD).await.unwrap();
    assert_eq!(principal.method, AuthMethod::Fallback);
    assert!(principal.is_admin());
    assert!(client.gate().is_authenticated());

    let shared: Arc<dyn Table<Project>> = Arc::new(client.table::<Project>());
    let mut editor = Editor::new(shared);
    editor.begin_add();
    editor.draft_mut().title = "Clean Water".into();
    editor.draft_mut().location = "Kano, Nigeria".into();
    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome.record.title, "Clean Water");
    assert_eq!(backend.projects.len().await, 1);

    editor.begin_edit(outcome.record.id).unwrap();
    editor.draft_mut().status = "completed".into();
    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome.record.status, "Completed");
    assert!(!editor.reconcile().await.unwrap());

    // Tables taken before logout keep the revoked token.
    let stale_handle = client.table::<Project>();
    client.logout().await;
    assert!(!client.gate().is_authenticated());
    assert_matches!(
        stale_handle.delete(outcome.record.id).await,
        Err(StoreError::Unauthorized(_))
    );
    assert_eq!(backend.projects.len().await, 1);
}

#[tokio::test]
async fn bad_password_is_rejected_and_gate_stays_closed() {
    let (url, _backend) = spawn_server().await;
    let mut client = ApiClient::new(url);

    let err = client.login(USERNAME, "wrong-password").await.unwrap_err();
    assert_matches!(err, AdminError::Core(CoreError::Unauthorized(m)) if m == "Invalid email or password");
    assert!(!client.gate().is_authenticated());
}

#[tokio::test]
async fn public_reads_work_without_login() {
    let (url, backend) = spawn_server().await;
    let mut client = ApiClient::new(url);
    client.login(USERNAME, PASSWORD).await.unwrap();

    let gallery = client.table::<GalleryItem>();
    for (n, tag) in ["#water", "school", "water"].iter().enumerate() {
        let draft = CreateGalleryItem {
            title: format!("Photo {n}"),
            image_url: "https://images.example.org/photo.jpg".into(),
            hashtag: Some(tag.to_string()),
            description: None,
        };
        gallery.create(&draft).await.unwrap();
    }
    client.logout().await;

    let anonymous = client.table::<GalleryItem>();
    let water = anonymous
        .list(&ListQuery::latest(10).with_category("water"))
        .await
        .unwrap();
    assert_eq!(water.len(), 2);
    assert_eq!(water[0].title, "Photo 2");
    assert!(anonymous.find_by_id(999).await.unwrap().is_none());
    assert_eq!(backend.gallery.len().await, 3);

    let denied = anonymous
        .create(&CreateGalleryItem::default())
        .await;
    assert_matches!(denied, Err(StoreError::Unauthorized(_)));
}

#[tokio::test]
async fn saved_session_resumes_until_logout() {
    let (url, _backend) = spawn_server().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("client.json");

    let mut client = ApiClient::new(&url);
    client.login(USERNAME, PASSWORD).await.unwrap();
    let mut state = ClientState::load(&path).unwrap();
    state.remember(client.saved_auth().unwrap());
    state.save(&path).unwrap();

    let saved = ClientState::load(&path).unwrap().auth.unwrap();
    let mut resumed = ApiClient::new(&url);
    assert!(resumed.resume(&saved).await.unwrap());
    assert_eq!(resumed.principal().unwrap().identifier, USERNAME);
    assert_eq!(resumed.principal().unwrap().method, AuthMethod::Fallback);

    client.logout().await;
    let mut again = ApiClient::new(&url);
    assert!(!again.resume(&saved).await.unwrap());
    assert!(again.principal().is_none());
}

#[tokio::test]
async fn unreachable_server_is_unavailable() {
    // Bind then drop to get a port nobody is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = ApiClient::new(format!("http://{addr}"));
    assert_matches!(
        client.login(USERNAME, PASSWORD).await,
        Err(AdminError::Store(StoreError::Unavailable(_)))
    );
    assert_matches!(
        client.table::<Project>().list(&ListQuery::all()).await,
        Err(StoreError::Unavailable(_))
    );
}

#[tokio::test]
async fn admin_user_form_keeps_password_on_blank_edit() {
    let (url, backend) = spawn_server().await;
    let mut client = ApiClient::new(&url);
    client.login(USERNAME, PASSWORD).await.unwrap();

    let shared: Arc<dyn Table<AdminUser>> = Arc::new(client.table::<AdminUser>());
    let mut editor = Editor::new(shared);
    editor.begin_add();
    assert!(editor.draft().is_admin);
    *editor.draft_mut() = NewAdminUser {
        email: "ops@teamunited.org".into(),
        password: "ops-password-123".into(),
        is_admin: true,
    };
    let created = editor.save().await.unwrap().record;
    assert_eq!(created.email, "ops@teamunited.org");

    // Edit drafts start with a blank password; saving keeps the old one.
    editor.begin_edit(created.id).unwrap();
    assert!(editor.draft().password.is_empty());
    editor.draft_mut().email = "operations@teamunited.org".into();
    let outcome = editor.save().await.unwrap();
    assert_eq!(outcome.record.email, "operations@teamunited.org");

    let mut ops = ApiClient::new(&url);
    ops.login("operations@teamunited.org", "ops-password-123")
        .await
        .unwrap();
    ops.logout().await;

    assert!(editor.delete(created.id, |_| true).await.unwrap());
    assert!(editor.records().is_empty());
    assert_eq!(backend.store.admin_user_count().await, 0);
    assert!(!editor.reconcile().await.unwrap());
}
