use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::{Service, ServiceExt};

use ake_mock_server::app;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn authed_json_request(uri: &str, token: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(body.to_string())
        .unwrap()
}

fn authed_get(uri: &str, token: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {token}"))
        .body(String::new())
        .unwrap()
}

/// Send one request through a shared router so state persists between calls.
async fn send(app: &mut Router, request: Request<String>) -> axum::response::Response {
    ServiceExt::<Request<String>>::ready(app)
        .await
        .unwrap()
        .call(request)
        .await
        .unwrap()
}

async fn register(app: &mut Router, username: &str) -> String {
    let body = format!(
        r#"{{"username":"{username}","email":"{username}@ake-app.com","password":"gh8A*ghgh","description":"hi"}}"#
    );
    let resp = send(app, json_request("/register?token=true", &body)).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp).await;
    json["data"]["token"]["token"].as_str().unwrap().to_string()
}

// --- auth ---

#[tokio::test]
async fn register_with_token_flag_returns_bearer() {
    let resp = app()
        .oneshot(json_request(
            "/register?token=true",
            r#"{"username":"marin","email":"marin@ake-app.com","password":"gh8A*ghgh","description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "Created");
    assert_eq!(json["data"]["token"]["type"], "Bearer");
    assert!(json["data"]["token"]["token"].is_string());
    assert!(json["data"]["token"]["expiresAt"].is_string());
}

#[tokio::test]
async fn register_without_token_flag_has_no_data() {
    let resp = app()
        .oneshot(json_request(
            "/register",
            r#"{"username":"marin","email":"marin@ake-app.com","password":"gh8A*ghgh","description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let json = body_json(resp).await;
    assert!(json.get("data").is_none());
}

#[tokio::test]
async fn register_invalid_fields_returns_400_with_rules() {
    let resp = app()
        .oneshot(json_request(
            "/register",
            r#"{"username":"","email":"nope","password":"short","description":""}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "Bad Request");
    let fields: Vec<&str> = json["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["username", "email", "password"]);
}

#[tokio::test]
async fn register_duplicate_email_returns_409() {
    let mut app = app();
    register(&mut app, "marin").await;

    let resp = send(
        &mut app,
        json_request(
            "/register",
            r#"{"username":"other","email":"marin@ake-app.com","password":"gh8A*ghgh","description":""}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "Conflict");
    assert_eq!(json["errors"]["message"], "Email already used");
}

#[tokio::test]
async fn login_wrong_password_returns_401() {
    let mut app = app();
    register(&mut app, "marin").await;

    let resp = send(
        &mut app,
        json_request(
            "/login?token=true",
            r#"{"email":"marin@ake-app.com","password":"wrong"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["errors"]["message"], "Invalid credentials");
}

#[tokio::test]
async fn authenticated_route_without_bearer_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/user/token").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(resp).await;
    assert_eq!(json["status"], "Unauthorized");
}

#[tokio::test]
async fn logout_revokes_token() {
    let mut app = app();
    let token = register(&mut app, "marin").await;

    let resp = send(&mut app, authed_get("/logout", &token)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, authed_get("/user/token", &token)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- routing ---

#[tokio::test]
async fn unknown_route_returns_404_without_json() {
    let resp = app()
        .oneshot(Request::builder().uri("/nope").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(serde_json::from_slice::<Value>(&body_bytes(resp).await).is_err());
}

// --- conversations & messages ---

#[tokio::test]
async fn conversation_lifecycle() {
    let mut app = app();
    let marin = register(&mut app, "marin").await;
    let bob = register(&mut app, "bob").await;

    // bob is user 2
    let resp = send(
        &mut app,
        authed_json_request(
            "/conversations/new",
            &marin,
            r#"{"participantsWithoutCreator":[2],"content":"hello bob"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let conv_id = body_json(resp).await["data"]["id"].as_u64().unwrap();

    let resp = send(&mut app, authed_get("/conversations/get?offset=0", &bob)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["lastMessage"], "hello bob");

    let resp = send(&mut app, authed_get("/conversations/search?query=BO", &marin)).await;
    assert_eq!(body_json(resp).await["data"].as_array().unwrap().len(), 1);

    let resp = send(&mut app, authed_get("/conversations/search?query=zed", &marin)).await;
    assert!(body_json(resp).await["data"].as_array().unwrap().is_empty());

    let resp = send(
        &mut app,
        authed_json_request(
            "/message/send",
            &bob,
            &format!(r#"{{"convId":{conv_id},"content":"hi marin"}}"#),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let msg_id = body_json(resp).await["data"]["id"].as_u64().unwrap();

    let resp = send(
        &mut app,
        authed_get(&format!("/message/get?convId={conv_id}"), &marin),
    )
    .await;
    let json = body_json(resp).await;
    let messages = json["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "hi marin");
    assert_eq!(messages[0]["read"], false);

    let resp = send(&mut app, authed_get(&format!("/message/read?msgId={msg_id}"), &marin)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &mut app,
        authed_get(&format!("/message/get?convId={conv_id}"), &marin),
    )
    .await;
    assert_eq!(body_json(resp).await["data"][0]["read"], true);
}

#[tokio::test]
async fn new_conversation_with_unknown_participant_returns_412() {
    let mut app = app();
    let token = register(&mut app, "marin").await;

    let resp = send(
        &mut app,
        authed_json_request(
            "/conversations/new",
            &token,
            r#"{"participantsWithoutCreator":[99],"content":"anyone?"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
    assert_eq!(body_json(resp).await["status"], "Precondition Failed");
}

#[tokio::test]
async fn send_message_to_foreign_conversation_returns_412() {
    let mut app = app();
    let token = register(&mut app, "marin").await;

    let resp = send(
        &mut app,
        authed_json_request("/message/send", &token, r#"{"convId":42,"content":"hi"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::PRECONDITION_FAILED);
}

// --- user ---

#[tokio::test]
async fn change_username_and_read_account() {
    let mut app = app();
    let token = register(&mut app, "marin").await;

    let resp = send(
        &mut app,
        authed_json_request("/user/username", &token, r#"{"username":"marin2"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &mut app,
        authed_json_request("/user/description", &token, r#"{"description":"new bio"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&mut app, authed_get("/user/account/informations", &token)).await;
    let json = body_json(resp).await;
    assert_eq!(json["data"]["username"], "marin2");
    assert_eq!(json["data"]["description"], "new bio");
    assert!(json["data"].get("password").is_none());
}

#[tokio::test]
async fn change_username_to_taken_name_returns_409() {
    let mut app = app();
    let token = register(&mut app, "marin").await;
    register(&mut app, "bob").await;

    let resp = send(
        &mut app,
        authed_json_request("/user/username", &token, r#"{"username":"bob"}"#),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}
