//! Mock API tests for the folio library.
//!
//! These tests use wiremock to simulate the portfolio API and check the
//! session lifecycle without network access or real accounts.

use std::sync::Arc;
use std::time::Duration;

use folio::auth::RegistrationForm;
use folio::content::ProjectInput;
use folio::error::{AuthError, LOGIN_FAILED_MESSAGE, NETWORK_ERROR_MESSAGE};
use folio::guard::{GuardDecision, RouteGuard};
use folio::http::DEFAULT_REQUEST_TIMEOUT;
use folio::{
    ApiClient, ApiUrl, ContentApi, Credentials, Error, MemoryTokenStore, ResourceId,
    SessionManager, SessionState, Token, TokenStore,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests sent without any Authorization header.
struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn session_for(server: &MockServer, store: Arc<MemoryTokenStore>) -> SessionManager {
    let api = ApiUrl::new(server.uri()).unwrap();
    let client = ApiClient::new(api, DEFAULT_REQUEST_TIMEOUT).unwrap();
    SessionManager::new(client, store)
}

async fn stored(store: &MemoryTokenStore) -> Option<String> {
    store
        .load()
        .await
        .unwrap()
        .map(|t| t.as_str().to_string())
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": token
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Startup
// ============================================================================

#[tokio::test]
async fn test_initialize_without_token_never_calls_me() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    assert!(session.is_loading());

    let state = session.initialize().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(!session.is_loading());
    assert!(!session.client().is_authorized());
}

#[tokio::test]
async fn test_initialize_with_valid_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer stored-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Ann",
            "email": "ann@example.com",
            "role": "admin"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stored-token").unwrap()));
    let session = session_for(&server, store.clone());

    session.initialize().await;

    let user = session.user().unwrap();
    assert_eq!(user.name, "Ann");
    assert!(user.is_admin());
    assert!(session.is_authenticated());
    assert_eq!(stored(&store).await.as_deref(), Some("stored-token"));
}

#[tokio::test]
async fn test_initialize_with_rejected_token_clears_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stale").unwrap()));
    let session = session_for(&server, store.clone());

    let state = session.initialize().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
    assert!(!session.client().is_authorized());

    // cleanup is idempotent
    session.logout().await;
    assert!(stored(&store).await.is_none());
}

#[tokio::test]
async fn test_initialize_timeout_is_validation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 1, "name": "A"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(Token::new("slow").unwrap()));
    let session =
        session_for(&server, store.clone()).with_validate_timeout(Duration::from_millis(100));

    let state = session.initialize().await;

    assert_eq!(state, SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
}

#[tokio::test]
async fn test_initialize_runs_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "A"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(Token::new("T1").unwrap()));
    let session = session_for(&server, store);

    session.initialize().await;
    let again = session.initialize().await;

    assert!(again.is_authenticated());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_persists_token_and_stamps_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "A"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;

    let user = session
        .login(Credentials::new("a@b.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, ResourceId::Number(1));
    assert_eq!(user.name, "A");
    assert_eq!(stored(&store).await.as_deref(), Some("T1"));
    assert!(session.is_authenticated());

    // a later request carries the new token
    let me: folio::User = session.client().get("/api/users/me").await.unwrap();
    assert_eq!(me.name, "A");
}

#[tokio::test]
async fn test_repeated_login_last_write_wins() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "b@c.com", "password": "secret2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 2, "name": "B"},
            "token": "T2"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;

    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();
    session.login(Credentials::new("b@c.com", "secret2")).await.unwrap();

    assert_eq!(stored(&store).await.as_deref(), Some("T2"));
    assert_eq!(session.client().authorization().unwrap().as_str(), "T2");
    assert_eq!(session.user().unwrap().name, "B");
}

#[tokio::test]
async fn test_login_rejected_uses_api_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "invalid email or password"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;

    let err = session
        .login(Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::InvalidCredentials { .. })));
    assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), "invalid email or password");
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
    assert!(!session.client().is_authorized());
}

#[tokio::test]
async fn test_login_accepts_user_with_both_id_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"_id": "64b7", "id": "64b7", "name": "A"},
            "token": "T1"
        })))
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let user = session
        .login(Credentials::new("a@b.com", "secret1"))
        .await
        .unwrap();

    assert_eq!(user.id, ResourceId::Text("64b7".to_string()));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_login_rejected_without_message_uses_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let err = session
        .login(Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), LOGIN_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_failed_relogin_keeps_established_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "wrong1"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "invalid email or password"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;
    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();

    let err = session
        .login(Credentials::new("a@b.com", "wrong1"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), "invalid email or password");
    assert!(session.is_authenticated());
    assert_eq!(stored(&store).await.as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_login_validation_happens_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let err = session
        .login(Credentials::new("not-an-email", ""))
        .await
        .unwrap_err();

    let Error::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("email"), Some("enter a valid email address"));
    assert_eq!(errors.get("password"), Some("password is required"));
}

#[tokio::test]
async fn test_login_network_failure() {
    // Learn a free port, then release it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let api = ApiUrl::new(format!("http://127.0.0.1:{port}")).unwrap();
    let client = ApiClient::new(api, Duration::from_secs(2)).unwrap();
    let store = Arc::new(MemoryTokenStore::new());
    let session = SessionManager::new(client, store.clone());
    session.initialize().await;

    let err = session
        .login(Credentials::new("a@b.com", "secret1"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.user_message(LOGIN_FAILED_MESSAGE), NETWORK_ERROR_MESSAGE);
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
}

#[tokio::test]
async fn test_double_submit_is_refused() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": {"id": 1, "name": "A"}, "token": "T1"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let (first, second) = tokio::join!(
        session.login(Credentials::new("a@b.com", "secret1")),
        session.login(Credentials::new("a@b.com", "secret1")),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(Error::Busy)));
}

#[tokio::test]
async fn test_anonymous_requests_omit_authorization() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;
    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();
}

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_mismatched_passwords_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let form = RegistrationForm::new("Ann", "ann@example.com", "secret1", "secret2");
    let err = session.register(form).await.unwrap_err();

    let Error::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(errors.get("confirm_password"), Some("passwords do not match"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_register_signs_in() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .and(body_json(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "user": {"_id": "u1", "name": "Ann", "email": "ann@example.com"},
            "token": "R1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;

    let form = RegistrationForm::new(" Ann ", "ann@example.com", "secret1", "secret1");
    let user = session.register(form).await.unwrap();

    assert_eq!(user.id, ResourceId::Text("u1".to_string()));
    assert_eq!(stored(&store).await.as_deref(), Some("R1"));
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_register_conflict_surfaces_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "email already registered"
        })))
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let form = RegistrationForm::new("Ann", "ann@example.com", "secret1", "secret1");
    let err = session.register(form).await.unwrap_err();

    assert_eq!(
        err.user_message(folio::error::REGISTER_FAILED_MESSAGE),
        "email already registered"
    );
    assert_eq!(session.state(), SessionState::Anonymous);
}

// ============================================================================
// Logout and forced logout
// ============================================================================

#[tokio::test]
async fn test_logout_from_any_state() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;

    // from unknown
    let store = Arc::new(MemoryTokenStore::with_token(Token::new("T0").unwrap()));
    let session = session_for(&server, store.clone());
    session.logout().await;
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(stored(&store).await.is_none());

    // from authenticated
    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();
    session.logout().await;
    assert!(!session.is_loading());
    assert!(!session.is_authenticated());
    assert!(stored(&store).await.is_none());
    assert!(!session.client().is_authorized());

    // from anonymous
    session.logout().await;
    assert_eq!(session.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_rejected_token_on_content_call_forces_logout() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;

    Mock::given(method("POST"))
        .and(path("/api/projects"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "jwt expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;
    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();

    let mut admin = RouteGuard::new(session.subscribe(), "/admin");
    assert_eq!(admin.current(), GuardDecision::Render);

    let input = ProjectInput {
        name: "folio".to_string(),
        ..Default::default()
    };
    let err = ContentApi::new(&session)
        .create_project(&input)
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
    assert_eq!(
        admin.next().await,
        Some(GuardDecision::Redirect {
            to: "/login".to_string(),
            from: "/admin".to_string()
        })
    );
}

#[tokio::test]
async fn test_late_rejection_of_replaced_token_keeps_new_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T1"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "secret2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "A"},
            "token": "T2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/projects"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "jwt expired"}))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;
    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();

    let content = ContentApi::new(&session);
    let (projects, relogin) = tokio::join!(content.list_projects(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        session.login(Credentials::new("a@b.com", "secret2")).await
    });

    assert!(projects.unwrap_err().is_unauthorized());
    assert!(relogin.is_ok());
    assert!(session.is_authenticated());
    assert_eq!(stored(&store).await.as_deref(), Some("T2"));
    assert_eq!(session.client().authorization(), Some(Token::new("T2").unwrap()));
}

#[tokio::test]
async fn test_logout_cancels_sign_in_in_flight() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user": {"id": 1, "name": "A"}, "token": "T1"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session_for(&server, store.clone());
    session.initialize().await;

    let (login, ()) = tokio::join!(
        session.login(Credentials::new("a@b.com", "secret1")),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            session.logout().await;
        }
    );

    assert!(matches!(login, Err(Error::Cancelled)));
    assert_eq!(session.state(), SessionState::Anonymous);
    assert!(stored(&store).await.is_none());
    assert!(!session.client().is_authorized());
}

#[tokio::test]
async fn test_writes_without_session_are_refused_locally() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/projects/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;

    let err = ContentApi::new(&session)
        .delete_project(&ResourceId::Number(3))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));
}

#[tokio::test]
async fn test_public_reads_and_comments() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;

    Mock::given(method("GET"))
        .and(path("/api/blog"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Hello", "author": {"name": "A"}},
            {"_id": "p2", "title": "Again"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/blog/1/comments"))
        .and(header("authorization", "Bearer T1"))
        .and(body_json(json!({"comment": "nice post"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 10,
            "content": "nice post",
            "author": {"name": "A"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;
    let content = ContentApi::new(&session);

    let posts = content.list_posts().await.unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].id, ResourceId::Text("p2".to_string()));

    // commenting needs a session
    assert!(content.add_comment(&posts[0].id, "nice post").await.is_err());

    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();
    let comment = content.add_comment(&posts[0].id, "  nice post ").await.unwrap();
    assert_eq!(comment.content, "nice post");
}

// ============================================================================
// Route guard
// ============================================================================

#[tokio::test]
async fn test_guard_waits_for_startup_then_redirects() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(
            ResponseTemplate::new(401).set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(Token::new("stale").unwrap()));
    let session = session_for(&server, store);
    let mut guard = RouteGuard::new(session.subscribe(), "/admin");

    assert_eq!(guard.current(), GuardDecision::Placeholder);

    let (_, decision) = tokio::join!(session.initialize(), guard.settled());

    assert_eq!(
        decision,
        GuardDecision::Redirect {
            to: "/login".to_string(),
            from: "/admin".to_string()
        }
    );
}

#[tokio::test]
async fn test_guard_sees_sign_in_and_out_between_polls() {
    let server = MockServer::start().await;
    mount_login(&server, "T1").await;

    let session = session_for(&server, Arc::new(MemoryTokenStore::new()));
    session.initialize().await;
    let mut guard = RouteGuard::new(session.subscribe(), "/admin");
    let redirect = GuardDecision::Redirect {
        to: "/login".to_string(),
        from: "/admin".to_string(),
    };
    assert_eq!(guard.current(), redirect);

    session.login(Credentials::new("a@b.com", "secret1")).await.unwrap();
    session.logout().await;

    assert_eq!(guard.next().await, Some(redirect));
}
