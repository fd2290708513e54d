use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use lexitutor::application::services::{BLOCKED_SUGGESTION, NOTHING_EXTRACTED_MESSAGE};
use lexitutor::domain::{OwnerId, SessionId};
use lexitutor::infrastructure::llm::MockLlmClient;
use lexitutor::infrastructure::text_processing::PlainTextAdapter;
use lexitutor::presentation::create_router;

use crate::helpers::TestHarness;

const BOUNDARY: &str = "lexitutor-test-boundary";

fn harness(reply: &str) -> TestHarness {
    TestHarness::new(MockLlmClient::new().with_reply(reply), Arc::new(PlainTextAdapter))
}

async fn send(harness: &TestHarness, request: Request<Body>) -> Response {
    create_router(harness.app_state())
        .oneshot(request)
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, owner: Option<OwnerId>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(owner) = owner {
        builder = builder.header("x-user-id", owner.to_string());
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, owner: OwnerId) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("x-user-id", owner.to_string())
        .body(Body::empty())
        .unwrap()
}

fn multipart_upload(owner: OwnerId, file: Option<(&str, &[u8])>, fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/chat/upload")
        .header("x-user-id", owner.to_string())
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn start_chat(harness: &TestHarness, owner: OwnerId) -> String {
    let response = send(
        harness,
        post_json("/api/chat", Some(owner), json!({ "message": "Hello tutor" })),
    )
    .await;
    json_body(response).await["sessionId"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let harness = harness("unused");

    let response = send(
        &harness,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn given_request_id_header_when_calling_then_it_is_echoed() {
    let harness = harness("unused");

    let response = send(
        &harness,
        Request::builder()
            .uri("/health")
            .header("x-request-id", "req-123")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn given_missing_identity_when_sending_message_then_unauthorized() {
    let harness = harness("unused");

    let response = send(&harness, post_json("/api/chat", None, json!({ "message": "Hi" }))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn given_malformed_identity_when_sending_message_then_unauthorized() {
    let harness = harness("unused");
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .header("x-user-id", "not-a-uuid")
        .body(Body::from(json!({ "message": "Hi" }).to_string()))
        .unwrap();

    let response = send(&harness, request).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_valid_message_when_sending_then_reply_and_session_id_returned() {
    let harness = harness("Hello! What would you like to practice?");

    let response = send(
        &harness,
        post_json("/api/chat", Some(OwnerId::new()), json!({ "message": "Hello tutor" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Hello! What would you like to practice?");
    assert!(body["sessionId"].is_string());
    assert!(body.get("isBlocked").is_none());
}

#[tokio::test]
async fn given_off_topic_message_when_sending_then_blocked_response_without_session() {
    let harness = harness("unused");

    let response = send(
        &harness,
        post_json(
            "/api/chat",
            Some(OwnerId::new()),
            json!({ "message": "giải toán giúp tôi" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["isBlocked"], true);
    assert_eq!(body["suggestion"], BLOCKED_SUGGESTION);
    assert!(body.get("sessionId").is_none());
    assert_eq!(harness.llm.call_count(), 0);
}

#[tokio::test]
async fn given_blank_message_when_sending_then_bad_request() {
    let harness = harness("unused");

    let response = send(
        &harness,
        post_json("/api/chat", Some(OwnerId::new()), json!({ "message": "   " })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn given_malformed_session_id_when_sending_then_bad_request() {
    let harness = harness("unused");

    let response = send(
        &harness,
        post_json(
            "/api/chat",
            Some(OwnerId::new()),
            json!({ "message": "Hello", "sessionId": "abc" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Invalid session id");
}

#[tokio::test]
async fn given_failing_model_when_sending_then_internal_error() {
    let harness = TestHarness::new(MockLlmClient::always_failing(), Arc::new(PlainTextAdapter));

    let response = send(
        &harness,
        post_json("/api/chat", Some(OwnerId::new()), json!({ "message": "Hello tutor" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["success"], false);
}

#[tokio::test]
async fn given_word_when_explaining_then_explanation_returned() {
    let harness = harness("Apple: a round fruit.");

    let response = send(
        &harness,
        post_json("/api/chat/explain", Some(OwnerId::new()), json!({ "word": "apple" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["explanation"], "Apple: a round fruit.");
}

#[tokio::test]
async fn given_text_upload_when_processing_then_result_returned_and_file_removed() {
    let harness = harness("Câu đã được sửa.");
    let owner = OwnerId::new();

    let response = send(
        &harness,
        multipart_upload(
            owner,
            Some(("essay.txt", b"I has a apple.".as_slice())),
            &[("task", "fix_grammar")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert!(body["sessionId"].is_string());
    assert_eq!(body["data"]["fileName"], "essay.txt");
    assert_eq!(body["data"]["originalText"], "I has a apple....");
    assert_eq!(body["data"]["result"], "Câu đã được sửa.");
    assert_eq!(harness.staged_file_count(), 0);

    let prompt = &harness.llm.requests()[0].messages[0].content;
    assert!(prompt.contains("Check the grammar"));
}

#[tokio::test]
async fn given_unsupported_upload_when_processing_then_nothing_extracted_response() {
    let harness = harness("unused");

    let response = send(
        &harness,
        multipart_upload(OwnerId::new(), Some(("diagram.bmp", b"BM bitmap".as_slice())), &[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["fileName"], "diagram.bmp");
    assert_eq!(body["extractedText"], "");
    assert_eq!(body["message"], NOTHING_EXTRACTED_MESSAGE);
    assert_eq!(harness.llm.call_count(), 0);
    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn given_form_without_file_when_uploading_then_bad_request() {
    let harness = harness("unused");

    let response = send(
        &harness,
        multipart_upload(OwnerId::new(), None, &[("task", "translate")]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Please upload a file");
}

#[tokio::test]
async fn given_empty_file_when_uploading_then_bad_request() {
    let harness = harness("unused");

    let response = send(
        &harness,
        multipart_upload(OwnerId::new(), Some(("empty.txt", b"".as_slice())), &[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.staged_file_count(), 0);
}

#[tokio::test]
async fn given_sessions_when_listing_history_then_owner_sessions_are_paginated() {
    let harness = harness("Sure.");
    let owner = OwnerId::new();
    start_chat(&harness, owner).await;
    start_chat(&harness, OwnerId::new()).await;

    let response = send(&harness, get("/api/chat/history?page=1&limit=5", owner)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let sessions = body["sessions"].as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["sessionName"], "Chat session");
    assert_eq!(sessions[0]["messageCount"], 2);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["pages"], 1);
    assert_eq!(body["pagination"]["limit"], 5);
}

#[tokio::test]
async fn given_own_session_when_fetching_then_messages_are_returned() {
    let harness = harness("Sure.");
    let owner = OwnerId::new();
    let session_id = start_chat(&harness, owner).await;

    let response = send(&harness, get(&format!("/api/chat/session/{session_id}"), owner)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let messages = body["session"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[0]["content"], "Hello tutor");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(body["session"]["userId"], owner.to_string());
}

#[tokio::test]
async fn given_foreign_session_when_fetching_then_forbidden() {
    let harness = harness("Sure.");
    let session_id = start_chat(&harness, OwnerId::new()).await;

    let response = send(
        &harness,
        get(&format!("/api/chat/session/{session_id}"), OwnerId::new()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_unknown_or_malformed_session_id_when_fetching_then_not_found_or_bad_request() {
    let harness = harness("unused");
    let owner = OwnerId::new();

    let unknown = send(
        &harness,
        get(&format!("/api/chat/session/{}", SessionId::new()), owner),
    )
    .await;
    let malformed = send(&harness, get("/api/chat/session/not-a-uuid", owner)).await;

    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}
