//! Login state machine tests against a mock accounts service.

mod common;

use std::sync::Arc;

use common::*;
use serde_json::json;
use syncliked::{
    Error,
    management::{AuthFlow, AuthState, CallbackQuery, MemoryTokenStore, TokenStore},
    types::Credential,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BASIC_AUTH: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

async fn mount_token_endpoint(server: &MockServer, response: ResponseTemplate, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=authorization_code"))
        .respond_with(response)
        .expect(expected)
        .mount(server)
        .await;
}

fn token_ok() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": "fresh-token",
        "token_type": "Bearer",
        "scope": "user-library-read playlist-modify-private playlist-modify-public",
        "expires_in": 3600
    }))
}

/// Extracts the `state` parameter from an authorize URL.
fn state_of(url: &str) -> String {
    reqwest::Url::parse(url)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

fn callback(code: &str, state: &str) -> CallbackQuery {
    CallbackQuery {
        code: Some(code.to_string()),
        state: Some(state.to_string()),
        error: None,
    }
}

#[tokio::test]
async fn test_complete_login_stores_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=one-time-code"))
        .and(body_string_contains("redirect_uri="))
        .respond_with(token_ok())
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let flow = AuthFlow::new(mock_client(&server), store.clone());

    let credential = flow.complete_login("one-time-code").await.unwrap();
    assert_eq!(credential.as_str(), "fresh-token");
    assert_eq!(store.load().await.unwrap(), Some(Credential::new("fresh-token")));
    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedIn);
}

#[tokio::test]
async fn test_failed_exchange_leaves_store_unchanged() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })),
        1,
    )
    .await;

    let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("old-token")));
    let flow = AuthFlow::new(mock_client(&server), store.clone());

    let err = flow.complete_login("expired-code").await.unwrap_err();
    assert!(matches!(err, Error::AuthExchange(_)));
    assert_eq!(store.load().await.unwrap(), Some(Credential::new("old-token")));
}

#[tokio::test]
async fn test_token_response_without_access_token_is_rejected() {
    let server = MockServer::start().await;
    mount_token_endpoint(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "token_type": "Bearer" })),
        1,
    )
    .await;

    let store = Arc::new(MemoryTokenStore::new());
    let flow = AuthFlow::new(mock_client(&server), store.clone());

    let err = flow.complete_login("code").await.unwrap_err();
    assert!(err.to_string().contains("access_token"), "{err}");
    assert!(store.load().await.unwrap().is_none());
    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_begin_login_moves_to_pending_callback() {
    let server = MockServer::start().await;
    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));

    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedOut);
    let url = flow.begin_login().await.unwrap();

    assert!(url.starts_with(&format!("{}/authorize?", server.uri())));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("client_id=client-id"));
    assert!(!url.contains("client-secret"));
    assert_eq!(flow.state().await.unwrap(), AuthState::PendingCallback);
}

#[tokio::test]
async fn test_resume_twice_exchanges_code_once() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, token_ok(), 1).await;

    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));
    let url = flow.begin_login().await.unwrap();
    let mut query = callback("one-time-code", &state_of(&url));

    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedIn);
    assert!(query.code.is_none());
    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedIn);
}

#[tokio::test]
async fn test_resume_after_failed_exchange_does_not_retry() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, ResponseTemplate::new(400), 1).await;

    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));
    let url = flow.begin_login().await.unwrap();
    let mut query = callback("one-time-code", &state_of(&url));

    assert!(matches!(
        flow.resume(&mut query).await,
        Err(Error::AuthExchange(_))
    ));
    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedOut);
    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_resume_without_code_is_a_no_op() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, token_ok(), 0).await;

    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));
    let mut query = CallbackQuery::default();

    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedOut);
    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_resume_when_logged_in_ignores_code() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, token_ok(), 0).await;

    let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("stored")));
    let flow = AuthFlow::new(mock_client(&server), store.clone());
    let mut query = callback("stale-code", "whatever");

    assert_eq!(flow.resume(&mut query).await.unwrap(), AuthState::LoggedIn);
    assert_eq!(store.load().await.unwrap(), Some(Credential::new("stored")));
}

#[tokio::test]
async fn test_resume_rejects_forged_state() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, token_ok(), 0).await;

    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));
    flow.begin_login().await.unwrap();
    let mut query = callback("one-time-code", "forged");

    assert!(matches!(
        flow.resume(&mut query).await,
        Err(Error::AuthExchange(_))
    ));
    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_resume_reports_denied_authorization() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, token_ok(), 0).await;

    let flow = AuthFlow::new(mock_client(&server), Arc::new(MemoryTokenStore::new()));
    flow.begin_login().await.unwrap();
    let mut query = CallbackQuery {
        code: None,
        state: None,
        error: Some("access_denied".to_string()),
    };

    let err = flow.resume(&mut query).await.unwrap_err();
    assert!(err.to_string().contains("access_denied"), "{err}");
    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedOut);
}

#[tokio::test]
async fn test_logout_is_idempotent() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_credential(Credential::new("stored")));
    let flow = AuthFlow::new(mock_client(&server), store.clone());

    flow.logout().await.unwrap();
    flow.logout().await.unwrap();

    assert!(store.load().await.unwrap().is_none());
    assert_eq!(flow.state().await.unwrap(), AuthState::LoggedOut);
}
