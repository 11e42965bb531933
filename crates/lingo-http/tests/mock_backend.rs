//! Mock backend tests for the gateway and typed endpoint clients.
//!
//! These tests use wiremock to simulate the backend and exercise the
//! session-expiry policy without network access or real credentials.

use std::sync::{Arc, Mutex};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lingo_core::error::{AuthError, Error};
use lingo_core::{
    ApiRequest, ApiUrl, Credential, CredentialStore, ExpiryListener, ExpiryReason,
    MemoryCredentialStore, ResponseClass,
};
use lingo_http::{AuthClient, Gateway};

/// Records every expiry notification it receives.
#[derive(Default)]
struct RecordingListener {
    events: Mutex<Vec<ExpiryReason>>,
}

impl RecordingListener {
    fn events(&self) -> Vec<ExpiryReason> {
        self.events.lock().unwrap().clone()
    }
}

impl ExpiryListener for RecordingListener {
    fn on_session_expired(&self, reason: ExpiryReason) {
        self.events.lock().unwrap().push(reason);
    }
}

fn mock_host(server: &MockServer) -> ApiUrl {
    ApiUrl::new(&format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn credential(token: &str) -> Credential {
    Credential::new(token, "Jane", "Doe", Some("avatars/jane.png".to_string()))
}

fn gateway_with(
    server: &MockServer,
    store: Arc<MemoryCredentialStore>,
) -> (Gateway, Arc<RecordingListener>) {
    let listener = Arc::new(RecordingListener::default());
    let gateway = Gateway::new(mock_host(server), store)
        .with_expiry_listener(listener.clone());
    (gateway, listener)
}

// ============================================================================
// Session-expiry policy
// ============================================================================

#[tokio::test]
async fn missing_credential_short_circuits_without_network_call() {
    let server = MockServer::start().await;

    // Any request reaching the server is a failure.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway.send(ApiRequest::get("api/profile")).await;

    assert_eq!(response.status, 401);
    assert_eq!(response.class, ResponseClass::AuthFailure);
    assert_eq!(listener.events(), vec![ExpiryReason::MissingCredential]);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn missing_credential_is_not_deduplicated() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let (gateway, listener) = gateway_with(&server, store);

    let first = gateway.send(ApiRequest::get("api/profile")).await;
    let second = gateway.send(ApiRequest::get("api/profile")).await;

    assert_eq!(first.status, 401);
    assert_eq!(second.status, 401);
    assert_eq!(first.body, second.body);
    assert_eq!(
        listener.events(),
        vec![
            ExpiryReason::MissingCredential,
            ExpiryReason::MissingCredential
        ]
    );
}

#[tokio::test]
async fn rejected_credential_clears_store_and_passes_response_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "token expired"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("expired")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway.send(ApiRequest::get("api/profile")).await;

    assert_eq!(response.status, 403);
    assert_eq!(response.class, ResponseClass::AuthFailure);
    assert_eq!(response.error_message().as_deref(), Some("token expired"));
    assert_eq!(listener.events(), vec![ExpiryReason::Rejected(403)]);
    // All persisted fields are gone, not just the token.
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn unauthorized_401_is_treated_like_403() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("bad")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway.send(ApiRequest::get("api/get-ai-exam")).await;

    assert_eq!(response.status, 401);
    assert_eq!(listener.events(), vec![ExpiryReason::Rejected(401)]);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn transport_failure_synthesizes_500_and_expires_session() {
    // Bind a listener to reserve an address, then shut it down so the
    // connection is refused. (A dropped `MockServer::start()` server is
    // returned to wiremock's pool with its listener still bound, so it
    // would answer 404 instead of refusing the connection.)
    let listener_socket = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener_socket.local_addr().unwrap().port();
    drop(listener_socket);
    let host = ApiUrl::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let listener = Arc::new(RecordingListener::default());
    let gateway = Gateway::new(host, store.clone())
        .with_expiry_listener(listener.clone());

    let response = gateway.send(ApiRequest::get("api/profile")).await;

    assert_eq!(response.status, 500);
    assert_eq!(response.class, ResponseClass::NetworkFailure);
    assert_eq!(listener.events(), vec![ExpiryReason::Transport]);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn success_leaves_credential_untouched() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer abc123"))
        .and(header("ngrok-skip-browser-warning", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fname": "Jane"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway.send(ApiRequest::get("api/profile")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.class, ResponseClass::Success);
    assert_eq!(response.text(), r#"{"fname":"Jane"}"#);
    assert!(listener.events().is_empty());

    let remaining = store.load().await.unwrap().unwrap();
    assert_eq!(remaining.token.as_str(), "abc123");
}

#[tokio::test]
async fn business_error_passes_through_without_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit-exam"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "missing answers"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway
        .send(ApiRequest::post("api/submit-exam").json(json!({})))
        .await;

    assert_eq!(response.status, 400);
    assert_eq!(response.class, ResponseClass::BusinessError);
    assert_eq!(response.error_message().as_deref(), Some("missing answers"));
    assert!(listener.events().is_empty());
    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn server_500_is_a_business_error_not_an_expiry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string("Internal Server Error")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let response = gateway.send(ApiRequest::get("api/get-ai-exam")).await;

    assert_eq!(response.status, 500);
    assert_eq!(response.class, ResponseClass::BusinessError);
    assert!(listener.events().is_empty());
    assert!(store.load().await.unwrap().is_some());
}

// ============================================================================
// Header handling
// ============================================================================

#[tokio::test]
async fn default_content_type_is_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit-exam"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let response = gateway
        .send(ApiRequest::post("api/submit-exam").json(json!({"answers": [1]})))
        .await;

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn caller_content_type_wins_over_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/stt"))
        .and(header("content-type", "audio/wav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hello"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let request = ApiRequest::post("api/stt")
        .header("Content-Type", "audio/wav")
        .raw(vec![0u8; 16]);
    let response = gateway.send(request).await;

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn multipart_keeps_boundary_content_type() {
    let server = MockServer::start().await;

    // The boundary is generated per request, so only the prefix is stable.
    Mock::given(method("POST"))
        .and(path("/api/stt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "hi"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let transcription = gateway.transcribe(vec![0u8; 64]).await.unwrap();
    assert_eq!(transcription.text, "hi");
}

// ============================================================================
// Typed endpoint layer
// ============================================================================

#[tokio::test]
async fn login_persists_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "usernameOrEmail": "jane@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "fname": "Jane",
            "lname": "Doe",
            "avatar": null
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let auth = AuthClient::new(mock_host(&server), store.clone());

    let credential = auth.login("jane@example.com", "secret123").await.unwrap();
    assert_eq!(credential.display_name(), "Jane Doe");

    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.token.as_str(), "fresh-token");
}

#[tokio::test]
async fn login_rejection_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"message": "username or password is incorrect"})),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let auth = AuthClient::new(mock_host(&server), store.clone());

    let err = auth.login("jane@example.com", "wrong").await.unwrap_err();
    match err {
        Error::Auth(AuthError::InvalidCredentials { message }) => {
            assert_eq!(message, "username or password is incorrect");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn fetch_exam_parses_paper() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get-ai-exam"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "questions": [
                {"id": 1, "question": "Pick the synonym of 'rapid'", "options": ["slow", "fast", "loud", "late"]}
            ],
            "duration": 1800,
            "message": "good luck"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let paper = gateway.fetch_exam().await.unwrap();
    assert_eq!(paper.questions.len(), 1);
    assert_eq!(paper.duration, 1800);
    assert_eq!(paper.questions[0].options[1], "fast");
}

#[tokio::test]
async fn submit_exam_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/submit-exam"))
        .and(body_json(json!({"answers": [1, -1, 2]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "score": 66.7,
            "exam": {"questions": []},
            "u_answers": [1, -1, 2],
            "message": "graded"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let outcome = gateway.submit_exam(&[1, -1, 2]).await.unwrap();
    assert_eq!(outcome.u_answers, vec![1, -1, 2]);
    assert!((outcome.score - 66.7).abs() < f64::EPSILON);
}

#[tokio::test]
async fn typed_call_maps_auth_failure_to_session_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get-ai-exam"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "expired"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("old")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    let err = gateway.fetch_exam().await.unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));
    assert_eq!(listener.events(), vec![ExpiryReason::Rejected(401)]);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn random_questions_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/speaking-questions/random"))
        .and(query_param("count", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "questions": [
                {"id": 7, "question": "Describe your hometown", "topic": "Travel", "difficulty": 0},
                {"question": "What is your favourite food?", "topic": "Food", "difficulty": 1}
            ]
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let questions = gateway.random_questions(2).await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[1].topic, "Food");
    assert_eq!(questions[1].id, None);
}

#[tokio::test]
async fn listening_test_sends_query_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/get-ai-listening-test"))
        .and(query_param("subject", "travel"))
        .and(query_param("type", "ielts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "audio": {"filename": "passage.wav", "full_path": "/audio/passage.wav"},
            "questions": [
                {
                    "question": "Where does the speaker live?",
                    "type": "multiple_choice",
                    "options": ["Hanoi", "Hue", "Da Nang"],
                    "correct_answer": "Hanoi",
                    "explanation": "Stated in the first sentence."
                }
            ],
            "text": "I live in Hanoi."
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let test = gateway.fetch_listening_test("travel", "ielts").await.unwrap();
    assert_eq!(test.audio.filename, "passage.wav");
    assert_eq!(test.questions[0].kind, "multiple_choice");
}

#[tokio::test]
async fn recording_check_uploads_multipart_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check-speaking-recording"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completed": false,
            "item_index": 2,
            "evaluation": {
                "accuracy_score": 87.5,
                "expected_text": "The weather is nice today",
                "result_text": "The weather is nice today",
                "word_level_analysis": []
            }
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let check = gateway
        .check_speaking_recording("sess-1", 2, "The weather is nice today", vec![0u8; 128])
        .await
        .unwrap();
    assert_eq!(check.item_index, Some(2));
    let evaluation = check.evaluation.unwrap();
    assert!((evaluation.accuracy_score - 87.5).abs() < f64::EPSILON);
}

#[tokio::test]
async fn verify_true_on_valid_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Token is valid"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    assert!(gateway.verify().await);
    assert!(listener.events().is_empty());
    assert!(store.load().await.unwrap().is_some());
}

#[tokio::test]
async fn verify_false_and_logged_out_on_rejected_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token has expired"})))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("stale")));
    let (gateway, listener) = gateway_with(&server, store.clone());

    assert!(!gateway.verify().await);
    assert_eq!(listener.events(), vec![ExpiryReason::Rejected(401)]);
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn conversation_start_and_text_turn() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/conversation/start"))
        .and(body_json(json!({"topic": "travel"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "session_id": "conv-1",
            "greeting_text": "Hi! Where would you like to go?",
            "audio_path": "/audio/greeting.wav"
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/conversation/send-text"))
        .and(body_json(json!({
            "session_id": "conv-1",
            "text": "I want to visit Hanoi",
            "topic": "travel"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response_text": "Hanoi is lovely in autumn.",
            "audio_path": "/audio/reply.wav"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_credential(credential("abc123")));
    let (gateway, _) = gateway_with(&server, store);

    let start = gateway.start_conversation("travel").await.unwrap();
    assert_eq!(start.session_id, "conv-1");

    let reply = gateway
        .send_conversation_text("conv-1", "I want to visit Hanoi", "travel")
        .await
        .unwrap();
    assert_eq!(
        reply.response_text.as_deref(),
        Some("Hanoi is lovely in autumn.")
    );
}
