//! Endpoint adapters over a real HTTP transport against a mock service

use std::rc::Rc;

use daily_todo_core::{
    ApiClient, AppError, AuthApi, MemoryCookieJar, NewTask, ReqwestTransport, SessionController,
    TaskApi, TaskPatch, TokenStore, TOKEN_TTL_SECS,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> (TokenStore, ApiClient) {
    let tokens = TokenStore::new(Rc::new(MemoryCookieJar::new()));
    let transport = Rc::new(ReqwestTransport::new(server.uri()));
    let client = ApiClient::new(transport, tokens.clone());
    (tokens, client)
}

fn signed_in(server: &MockServer) -> TaskApi {
    let (tokens, client) = client(server);
    tokens.write("abc123", TOKEN_TTL_SECS);
    TaskApi::new(client)
}

#[tokio::test]
async fn test_login_then_list_sends_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "karel", "password": "secret1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/task/get"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [
                {"id": 1, "title": "Buy milk", "description": null, "isFinished": 0, "createdAt": "2026-10-18 08:00:00"},
                {"id": 2, "title": "Call mom", "isFinished": true}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (tokens, client) = client(&server);
    let session = SessionController::new(tokens.clone(), AuthApi::new(client.clone()));
    session.initialize();
    session.login("karel", "secret1").await.expect("login failed");
    assert_eq!(tokens.read().as_deref(), Some("abc123"));

    let tasks = TaskApi::new(client).list().await.expect("list failed");
    assert_eq!(tasks.len(), 2);
    assert!(!tasks[0].is_finished);
    assert!(tasks[1].is_finished);
}

#[tokio::test]
async fn test_login_rejection_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let (tokens, client) = client(&server);
    let err = AuthApi::new(client).login("karel", "nope").await.unwrap_err();
    assert_eq!(err, AppError::RequestFailed("Invalid credentials".into()));
    assert!(!tokens.is_present());
}

#[tokio::test]
async fn test_error_field_is_used_when_message_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/get/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Task not found"})))
        .mount(&server)
        .await;

    let err = signed_in(&server).get(42).await.unwrap_err();
    assert_eq!(err, AppError::RequestFailed("Task not found".into()));
}

#[tokio::test]
async fn test_unreadable_error_body_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/get"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = signed_in(&server).list().await.unwrap_err();
    assert_eq!(err, AppError::RequestFailed("Request failed".into()));
}

#[tokio::test]
async fn test_no_token_means_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_, client) = client(&server);
    let err = TaskApi::new(client).list().await.unwrap_err();
    assert_eq!(err, AppError::Unauthenticated);
}

#[tokio::test]
async fn test_create_omits_absent_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/task/new"))
        .and(body_json(json!({"title": "Buy milk", "isFinished": false})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "task": {"id": 11, "title": "Buy milk", "isFinished": false}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let new_task = NewTask::new("Buy milk", None).unwrap();
    let task = signed_in(&server).create(&new_task).await.expect("create failed");
    assert_eq!(task.id, 11);
    assert_eq!(task.description, None);
}

#[tokio::test]
async fn test_update_unwraps_updated_task() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/task/update/status/7"))
        .and(body_json(json!({"isFinished": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedTask": {"id": 7, "title": "Run", "isFinished": 1}
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/task/update/7"))
        .and(body_json(json!({"title": "Run 5k"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updatedTask": {"id": 7, "title": "Run 5k", "isFinished": 1}
        })))
        .mount(&server)
        .await;

    let api = signed_in(&server);
    assert!(api.update_status(7, true).await.unwrap().is_finished);

    let patch = TaskPatch::new(Some("Run 5k"), None).unwrap();
    assert_eq!(api.update(7, &patch).await.unwrap().title, "Run 5k");
}

#[tokio::test]
async fn test_delete_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/task/delete/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    signed_in(&server).delete(5).await.expect("delete failed");
}

#[tokio::test]
async fn test_unreachable_service_is_request_failed() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let tokens = TokenStore::new(Rc::new(MemoryCookieJar::new()));
    tokens.write("abc123", TOKEN_TTL_SECS);
    let client = ApiClient::new(Rc::new(ReqwestTransport::new(uri)), tokens);

    let err = TaskApi::new(client).list().await.unwrap_err();
    assert!(matches!(err, AppError::RequestFailed(_)));
}
