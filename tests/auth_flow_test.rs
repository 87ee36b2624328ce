//! Session lifecycle integration tests
//!
//! Covers the two-phase token flow: anonymous service token, login with
//! dashboard confirmation, rejection handling, silent auto-login and
//! logout.

mod helpers;

use assert_matches::assert_matches;
use helpers::{SymphonyXMockServer, TEST_STUDENT_ID};
use symphonyx_client::{ClientError, SessionPhase};

#[tokio::test]
async fn test_bootstrap_acquires_service_token() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_bootstrap("svc-token-1").await;
    let factory = mock.factory();

    factory.session_service.bootstrap().await;

    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::ServiceBootstrapped
    );
    assert_eq!(
        factory.session_store.active_token().await.as_deref(),
        Some("svc-token-1")
    );
}

#[tokio::test]
async fn test_bootstrap_failure_is_non_fatal() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_bootstrap_failure().await;
    let factory = mock.factory();

    // Must not panic or error; the session just stays unauthenticated.
    factory.session_service.bootstrap().await;

    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::Unauthenticated
    );
    assert!(factory.session_store.active_token().await.is_none());
}

#[tokio::test]
async fn test_login_confirms_profile_and_authenticates() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_bootstrap("svc-token").await;
    mock.mock_login_success("user-token").await;
    mock.mock_dashboard().await;
    let factory = mock.factory();

    factory.session_service.bootstrap().await;
    let profile = factory
        .session_service
        .login(TEST_STUDENT_ID, "secret", false)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(profile.user_id, TEST_STUDENT_ID);
    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::Authenticated
    );
    // The confirmed user token supersedes the service token.
    assert_eq!(
        factory.session_store.active_token().await.as_deref(),
        Some("user-token")
    );
}

#[tokio::test]
async fn test_login_rejection_surfaces_first_server_message() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_login_rejected(&["Account locked", "Contact the office"])
        .await;
    let factory = mock.factory();

    let err = factory
        .session_service
        .login(TEST_STUDENT_ID, "wrong", false)
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Authentication(msg) if msg == "Account locked");
    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::Unauthenticated
    );
}

#[tokio::test]
async fn test_silent_login_failure_returns_none() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_bootstrap("svc-token").await;
    mock.mock_login_rejected(&["Invalid credentials"]).await;
    let factory = mock.factory();

    factory.session_service.bootstrap().await;
    let outcome = factory
        .session_service
        .login(TEST_STUDENT_ID, "stale-saved-password", true)
        .await
        .unwrap();

    // Silent auto-login swallows the failure and leaves the session at
    // the pre-login phase with the service token intact.
    assert!(outcome.is_none());
    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::ServiceBootstrapped
    );
    assert_eq!(
        factory.session_store.active_token().await.as_deref(),
        Some("svc-token")
    );
}

#[tokio::test]
async fn test_login_token_without_profile_is_not_trusted() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_login_success("user-token").await;
    mock.mock_dashboard_with_user(None).await;
    let factory = mock.factory();

    let err = factory
        .session_service
        .login(TEST_STUDENT_ID, "secret", false)
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ClientError::Authentication(msg)
            if msg == "Server is not responding. Please try again later."
    );
    assert_ne!(
        factory.session_store.phase().await,
        SessionPhase::Authenticated
    );
    assert!(factory.session_store.user().await.is_none());
}

#[tokio::test]
async fn test_auto_login_without_saved_credentials_is_noop() {
    let mock = SymphonyXMockServer::new().await;
    let factory = mock.factory();

    let outcome = factory.session_service.auto_login().await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn test_auto_login_uses_remembered_credentials() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_login_success("user-token").await;
    mock.mock_dashboard().await;
    let factory = mock.factory();

    factory
        .session_service
        .remember(TEST_STUDENT_ID, "secret")
        .await
        .unwrap();
    let profile = factory.session_service.auto_login().await.unwrap();

    assert_eq!(profile.unwrap().user_id, TEST_STUDENT_ID);
    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::Authenticated
    );
}

#[tokio::test]
async fn test_logout_clears_session_and_saved_credentials() {
    let mock = SymphonyXMockServer::new().await;
    mock.mock_login_success("user-token").await;
    mock.mock_dashboard().await;
    let factory = mock.factory();

    factory
        .session_service
        .remember(TEST_STUDENT_ID, "secret")
        .await
        .unwrap();
    helpers::login(&factory).await;

    factory.session_service.logout(true).await.unwrap();

    assert_eq!(
        factory.session_store.phase().await,
        SessionPhase::Unauthenticated
    );
    assert!(factory.session_store.active_token().await.is_none());
    assert!(factory.session_service.auto_login().await.unwrap().is_none());
}
