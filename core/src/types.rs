//! Domain DTOs for the Ake API.
//!
//! # Design
//! Field names follow the server's camelCase JSON. Parameter structs that are
//! sent as a body serialize directly; those sent as query parameters are
//! unpacked by the endpoint functions in `api`, where `None` fields are left
//! out of the URL.
//!
//! The mock server defines its own copies of these shapes; the integration
//! tests catch drift between the two crates.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterParameters {
    pub username: String,
    pub email: String,
    pub password: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginParameters {
    pub email: String,
    pub password: String,
}

/// A bearer token issued by register or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    /// `"Bearer"` or `"bearer"` depending on the endpoint.
    #[serde(rename = "type")]
    pub token_type: String,
    pub token: String,
    pub expires_at: String,
}

/// `data` of a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenEnvelope {
    pub token: AccessToken,
}

/// `data` of a successful socket token request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SocketToken {
    pub token: String,
    pub expires_at: String,
}

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewConversationParameters {
    pub participants_without_creator: Vec<u64>,
    /// First message of the conversation.
    pub content: String,
}

/// Conversations are returned twelve at a time, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetConversationParameters {
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchConversationParameters {
    pub offset: Option<u64>,
    pub query: Option<String>,
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageParameters {
    pub conv_id: u64,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GetMessagesParameters {
    pub conv_id: u64,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadMessageParameters {
    pub msg_id: u64,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// Without `user_id` the server describes the authenticated user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountInformationsParameters {
    pub user_id: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeDescriptionParameters {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeUsernameParameters {
    pub username: String,
}
