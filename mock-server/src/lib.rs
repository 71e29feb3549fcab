//! In-memory implementation of the Ake HTTP API.
//!
//! Covers the routes the SDK knows about with enough behaviour to exercise
//! every response shape: `Created`/`Ok` envelopes, field validation errors,
//! conflicts, precondition failures and missing bearer tokens. Only token
//! authentication is implemented; session-mode logins succeed without data.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Conversations and messages are paged by this many items.
pub const PAGE_SIZE: usize = 12;

const TOKEN_EXPIRES_AT: &str = "2099-01-01T00:00:00.000Z";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: u64,
    pub created_by: u64,
    pub participants: Vec<u64>,
    pub last_message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u64,
    pub conv_id: u64,
    pub author_id: u64,
    pub content: String,
    pub read: bool,
}

#[derive(Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConversationInput {
    pub participants_without_creator: Vec<u64>,
    pub content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageInput {
    pub conv_id: u64,
    pub content: String,
}

#[derive(Deserialize)]
pub struct DescriptionInput {
    pub description: String,
}

#[derive(Deserialize)]
pub struct UsernameInput {
    pub username: String,
}

#[derive(Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: bool,
}

#[derive(Deserialize)]
pub struct PageQuery {
    pub offset: Option<usize>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub offset: Option<usize>,
    pub query: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub conv_id: u64,
    pub offset: Option<usize>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadQuery {
    pub msg_id: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub user_id: Option<u64>,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: u64,
    users: Vec<User>,
    tokens: HashMap<String, u64>,
    conversations: Vec<Conversation>,
    messages: Vec<Message>,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn issue_token(&mut self, user_id: u64) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    /// The conversation `conv_id`, if `user_id` takes part in it.
    fn conversation_of(&self, conv_id: u64, user_id: u64) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.id == conv_id && c.participants.contains(&user_id))
    }
}

pub type Db = Arc<RwLock<Store>>;

type Reply = Result<Response, Response>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/user/token", get(socket_token))
        .route("/conversations/new", post(new_conversation))
        .route("/conversations/get", get(get_conversations))
        .route("/conversations/search", get(search_conversations))
        .route("/message/send", post(send_message))
        .route("/message/get", get(get_messages))
        .route("/message/read", get(read_message))
        .route("/user/account/informations", get(account_informations))
        .route("/user/description", post(change_description))
        .route("/user/username", post(change_username))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

fn envelope(code: StatusCode, status: &str, data: Option<Value>) -> Response {
    let body = match data {
        Some(data) => json!({ "status": status, "data": data }),
        None => json!({ "status": status }),
    };
    (code, Json(body)).into_response()
}

fn error(code: StatusCode, status: &str, message: &str) -> Response {
    (code, Json(json!({ "status": status, "errors": { "message": message } }))).into_response()
}

fn validation(errors: Vec<(&str, &str)>) -> Response {
    let errors: Vec<Value> = errors
        .into_iter()
        .map(|(field, rule)| {
            json!({ "message": format!("{rule} validation failed"), "rule": rule, "field": field })
        })
        .collect();
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "status": "Bad Request", "errors": errors })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    error(StatusCode::UNAUTHORIZED, "Unauthorized", "E_UNAUTHORIZED_ACCESS")
}

fn precondition_failed(message: &str) -> Response {
    error(StatusCode::PRECONDITION_FAILED, "Precondition Failed", message)
}

fn token_data(token: String, token_type: &str) -> Value {
    json!({ "token": { "type": token_type, "token": token, "expiresAt": TOKEN_EXPIRES_AT } })
}

/// Resolve the bearer token of `headers` to a user id.
fn authenticate(store: &Store, headers: &HeaderMap) -> Result<u64, Response> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|token| store.tokens.get(token).copied())
        .ok_or_else(unauthorized)
}

fn page<T>(items: impl Iterator<Item = T>, offset: Option<usize>) -> Vec<T> {
    items.skip(offset.unwrap_or(0)).take(PAGE_SIZE).collect()
}

fn to_value<T: Serialize>(value: T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

async fn register(
    State(db): State<Db>,
    Query(query): Query<TokenQuery>,
    Json(input): Json<RegisterInput>,
) -> Reply {
    let mut rules = Vec::new();
    if input.username.trim().is_empty() {
        rules.push(("username", "required"));
    }
    if !input.email.contains('@') {
        rules.push(("email", "email"));
    }
    if input.password.len() < 8 {
        rules.push(("password", "minLength"));
    }
    if !rules.is_empty() {
        return Err(validation(rules));
    }

    let mut store = db.write().await;
    if store.users.iter().any(|u| u.email == input.email) {
        return Err(error(StatusCode::CONFLICT, "Conflict", "Email already used"));
    }
    if store.users.iter().any(|u| u.username == input.username) {
        return Err(error(StatusCode::CONFLICT, "Conflict", "Username already used"));
    }

    let id = store.next_id();
    store.users.push(User {
        id,
        username: input.username,
        email: input.email,
        password: input.password,
        description: input.description,
    });
    info!(user_id = id, "user registered");

    let data = query.token.then(|| token_data(store.issue_token(id), "Bearer"));
    Ok(envelope(StatusCode::CREATED, "Created", data))
}

async fn login(
    State(db): State<Db>,
    Query(query): Query<TokenQuery>,
    Json(input): Json<LoginInput>,
) -> Reply {
    let mut store = db.write().await;
    let id = store
        .users
        .iter()
        .find(|u| u.email == input.email && u.password == input.password)
        .map(|u| u.id)
        .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized", "Invalid credentials"))?;

    let data = query.token.then(|| token_data(store.issue_token(id), "bearer"));
    Ok(envelope(StatusCode::CREATED, "Created", data))
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let mut store = db.write().await;
    authenticate(&store, &headers)?;
    if let Some(token) = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        store.tokens.remove(token);
    }
    Ok(envelope(StatusCode::OK, "Created", None))
}

async fn socket_token(State(db): State<Db>, headers: HeaderMap) -> Reply {
    let store = db.read().await;
    authenticate(&store, &headers)?;
    let data = json!({
        "token": Uuid::new_v4().simple().to_string(),
        "expiresAt": TOKEN_EXPIRES_AT,
    });
    Ok(envelope(StatusCode::OK, "Ok", Some(data)))
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

async fn new_conversation(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<NewConversationInput>,
) -> Reply {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;

    let mut rules = Vec::new();
    if input.participants_without_creator.is_empty() {
        rules.push(("participantsWithoutCreator", "required"));
    }
    if input.content.trim().is_empty() {
        rules.push(("content", "required"));
    }
    if !rules.is_empty() {
        return Err(validation(rules));
    }
    if input
        .participants_without_creator
        .iter()
        .any(|id| store.user(*id).is_none())
    {
        return Err(precondition_failed("Unknown participant"));
    }

    let mut participants = vec![user_id];
    participants.extend(input.participants_without_creator);
    let conv_id = store.next_id();
    store.conversations.push(Conversation {
        id: conv_id,
        created_by: user_id,
        participants,
        last_message: input.content.clone(),
    });
    let msg_id = store.next_id();
    store.messages.push(Message {
        id: msg_id,
        conv_id,
        author_id: user_id,
        content: input.content,
        read: false,
    });

    Ok(envelope(StatusCode::CREATED, "Created", Some(json!({ "id": conv_id }))))
}

async fn get_conversations(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Reply {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    let conversations = page(
        store
            .conversations
            .iter()
            .rev()
            .filter(|c| c.participants.contains(&user_id))
            .cloned(),
        query.offset,
    );
    Ok(envelope(StatusCode::OK, "Ok", Some(to_value(conversations))))
}

async fn search_conversations(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Reply {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    let needle = query.query.unwrap_or_default().to_lowercase();
    let conversations = page(
        store
            .conversations
            .iter()
            .rev()
            .filter(|c| c.participants.contains(&user_id))
            .filter(|c| {
                c.participants.iter().any(|id| {
                    *id != user_id
                        && store
                            .user(*id)
                            .is_some_and(|u| u.username.to_lowercase().contains(&needle))
                })
            })
            .cloned(),
        query.offset,
    );
    Ok(envelope(StatusCode::OK, "Ok", Some(to_value(conversations))))
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

async fn send_message(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<SendMessageInput>,
) -> Reply {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    if input.content.trim().is_empty() {
        return Err(validation(vec![("content", "required")]));
    }
    if store.conversation_of(input.conv_id, user_id).is_none() {
        return Err(precondition_failed("Conversation not found"));
    }

    let id = store.next_id();
    store.messages.push(Message {
        id,
        conv_id: input.conv_id,
        author_id: user_id,
        content: input.content.clone(),
        read: false,
    });
    if let Some(conversation) = store.conversations.iter_mut().find(|c| c.id == input.conv_id) {
        conversation.last_message = input.content;
    }

    Ok(envelope(StatusCode::CREATED, "Created", Some(json!({ "id": id }))))
}

async fn get_messages(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<MessagesQuery>,
) -> Reply {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    if store.conversation_of(query.conv_id, user_id).is_none() {
        return Err(precondition_failed("Conversation not found"));
    }
    let messages = page(
        store
            .messages
            .iter()
            .rev()
            .filter(|m| m.conv_id == query.conv_id)
            .cloned(),
        query.offset,
    );
    Ok(envelope(StatusCode::OK, "Ok", Some(to_value(messages))))
}

async fn read_message(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ReadQuery>,
) -> Reply {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    let conv_id = store
        .messages
        .iter()
        .find(|m| m.id == query.msg_id)
        .map(|m| m.conv_id)
        .filter(|conv_id| store.conversation_of(*conv_id, user_id).is_some())
        .ok_or_else(|| precondition_failed("Message not found"))?;

    if let Some(message) = store
        .messages
        .iter_mut()
        .find(|m| m.id == query.msg_id && m.conv_id == conv_id)
    {
        message.read = true;
    }
    Ok(envelope(StatusCode::OK, "Ok", None))
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

async fn account_informations(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<AccountQuery>,
) -> Reply {
    let store = db.read().await;
    let user_id = authenticate(&store, &headers)?;
    let user = store
        .user(query.user_id.unwrap_or(user_id))
        .ok_or_else(|| precondition_failed("User not found"))?;
    Ok(envelope(StatusCode::OK, "Ok", Some(to_value(user))))
}

async fn change_description(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<DescriptionInput>,
) -> Reply {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    if let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) {
        user.description = input.description;
    }
    Ok(envelope(StatusCode::OK, "Ok", None))
}

async fn change_username(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UsernameInput>,
) -> Reply {
    let mut store = db.write().await;
    let user_id = authenticate(&store, &headers)?;
    if input.username.trim().is_empty() {
        return Err(validation(vec![("username", "required")]));
    }
    if store
        .users
        .iter()
        .any(|u| u.id != user_id && u.username == input.username)
    {
        return Err(error(StatusCode::CONFLICT, "Conflict", "Username already used"));
    }
    if let Some(user) = store.users.iter_mut().find(|u| u.id == user_id) {
        user.username = input.username;
    }
    Ok(envelope(StatusCode::OK, "Ok", None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_serialization_hides_password() {
        let user = User {
            id: 1,
            username: "marin".to_string(),
            email: "marin@ake-app.com".to_string(),
            password: "secret".to_string(),
            description: String::new(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "marin");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn conversation_serializes_camel_case() {
        let conversation = Conversation {
            id: 3,
            created_by: 1,
            participants: vec![1, 2],
            last_message: "hi".to_string(),
        };
        let json = serde_json::to_value(&conversation).unwrap();
        assert_eq!(json["createdBy"], 1);
        assert_eq!(json["lastMessage"], "hi");
    }

    #[test]
    fn register_input_defaults_description() {
        let body = r#"{"username":"a","email":"a@b.c","password":"12345678"}"#;
        let input: RegisterInput = serde_json::from_str(body).unwrap();
        assert!(input.description.is_empty());
    }

    #[test]
    fn token_query_defaults_to_false() {
        let query: TokenQuery = serde_json::from_str("{}").unwrap();
        assert!(!query.token);
    }

    #[test]
    fn page_skips_offset_and_caps_size() {
        let items = page(0..30, Some(5));
        assert_eq!(items.len(), PAGE_SIZE);
        assert_eq!(items[0], 5);
        assert!(page(0..3, Some(10)).is_empty());
    }

    #[test]
    fn store_ids_are_sequential() {
        let mut store = Store::default();
        assert_eq!(store.next_id(), 1);
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn authenticate_requires_known_bearer() {
        let mut store = Store::default();
        let token = store.issue_token(7);

        let mut headers = HeaderMap::new();
        assert!(authenticate(&store, &headers).is_err());

        headers.insert(header::AUTHORIZATION, "Bearer nope".parse().unwrap());
        assert!(authenticate(&store, &headers).is_err());

        headers.insert(header::AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        assert_eq!(authenticate(&store, &headers).unwrap(), 7);
    }
}
