//! Session lifecycle tests: login, persistence across restarts, logout.

mod common;

use common::*;
use crm_client::error::{AuthError, CrmError};
use crm_client::state::{keys, ThemeMode};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_demo_user(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("email", DEMO_EMAIL))
        .and(query_param("password", DEMO_PASSWORD))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([user_json(1, DEMO_EMAIL)])),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_demo_login_authenticates() {
    let server = MockServer::start().await;
    mount_demo_user(&server).await;
    let (app, storage) = test_app(&server);
    app.start(ThemeMode::Light).await;
    assert!(!app.auth.is_authenticated());

    let user = app.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
    assert_eq!(user.email, DEMO_EMAIL);
    assert!(user.is_admin());

    let state = app.auth.snapshot();
    assert!(state.is_authenticated());
    assert!(!state.is_loading);
    assert!(state.token.is_some());
    assert!(storage.value(keys::AUTH_TOKEN).is_some());
    assert!(storage.value(keys::USER).is_some());
}

#[tokio::test]
async fn test_wrong_password_is_invalid_credentials() {
    let server = MockServer::start().await;
    mount_demo_user(&server).await;
    let (app, storage) = test_app(&server);
    app.start(ThemeMode::Light).await;

    let err = app.login(DEMO_EMAIL, "not-the-password").await.unwrap_err();
    assert!(matches!(err, CrmError::Auth(AuthError::InvalidCredentials)));
    assert!(!app.auth.is_authenticated());
    assert!(!app.auth.is_loading());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_register_then_signed_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users"))
        .and(body_partial_json(serde_json::json!({
            "email": "new@example.com",
            "name": "New Person",
            "role": "user"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "abc",
            "email": "new@example.com",
            "name": "New Person",
            "role": "user",
            "created_at": "2024-05-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (app, _) = test_app(&server);

    let user = app
        .register("New Person", "new@example.com", "secret1", "secret1")
        .await
        .unwrap();
    assert_eq!(user.id, "abc");
    assert_eq!(app.auth.token().as_deref(), Some("mock-jwt-token-abc"));
}

#[tokio::test]
async fn test_register_mismatch_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    let (app, _) = test_app(&server);

    let err = app
        .register("New Person", "new@example.com", "secret1", "secret2")
        .await
        .unwrap_err();
    assert!(matches!(err, CrmError::Validation(_)));
}

#[tokio::test]
async fn test_session_survives_restart_with_file_store() {
    let server = MockServer::start().await;
    mount_demo_user(&server).await;
    let dir = tempfile::tempdir().unwrap();

    let first = file_backed_app(&server, dir.path());
    first.start(ThemeMode::Light).await;
    first.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();
    first.theme.toggle().await;
    drop(first);

    let second = file_backed_app(&server, dir.path());
    assert!(second.auth.is_loading());
    second.start(ThemeMode::Light).await;
    assert!(second.auth.is_authenticated());
    assert_eq!(
        second.auth.current_user().map(|u| u.email).as_deref(),
        Some(DEMO_EMAIL)
    );
    assert_eq!(second.theme.mode(), ThemeMode::Dark);

    second.logout().await;
    let third = file_backed_app(&server, dir.path());
    third.start(ThemeMode::Light).await;
    assert!(!third.auth.is_authenticated());
    assert_eq!(third.theme.mode(), ThemeMode::Dark);
}

#[tokio::test]
async fn test_corrupt_store_file_means_signed_out() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage.json"), "{ definitely not json").unwrap();

    let app = file_backed_app(&server, dir.path());
    app.start(ThemeMode::Dark).await;
    assert!(!app.auth.is_authenticated());
    assert!(!app.auth.is_loading());
    assert_eq!(app.theme.mode(), ThemeMode::Dark);
}

#[tokio::test]
async fn test_logout_clears_even_when_removal_fails() {
    let server = MockServer::start().await;
    mount_demo_user(&server).await;
    let (app, storage) = test_app(&server);
    app.start(ThemeMode::Light).await;
    app.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

    storage.fail_remove_of(keys::AUTH_TOKEN);
    app.logout().await;

    assert!(!app.auth.is_authenticated());
    assert!(app.auth.current_user().is_none());
    assert!(storage.value(keys::USER).is_none());
}

#[tokio::test]
async fn test_logout_without_backend() {
    // Logout is purely local
    let server = MockServer::start().await;
    let (app, _) = test_app(&server);
    drop(server);

    app.start(ThemeMode::Light).await;
    app.logout().await;
    assert!(!app.auth.is_authenticated());
}
