//! Static registry of Ake API endpoints.
//!
//! Paths are pre-resolved: the builder concatenates them to the base URL
//! without any templating.

use crate::http::HttpMethod;

/// Metadata for one logical server operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub requires_auth: bool,
    /// Whether the server expects `token=true` in the query string when the
    /// client runs in token mode, so it answers with a bearer token instead
    /// of opening a session.
    pub signals_token: bool,
}

const fn endpoint(
    name: &'static str,
    method: HttpMethod,
    path: &'static str,
    requires_auth: bool,
) -> EndpointDescriptor {
    EndpointDescriptor {
        name,
        method,
        path,
        requires_auth,
        signals_token: false,
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

pub const REGISTER: EndpointDescriptor = EndpointDescriptor {
    signals_token: true,
    ..endpoint("register", HttpMethod::Post, "/register", false)
};

pub const LOGIN: EndpointDescriptor = EndpointDescriptor {
    signals_token: true,
    ..endpoint("login", HttpMethod::Post, "/login", false)
};

pub const LOGOUT: EndpointDescriptor = endpoint("logout", HttpMethod::Get, "/logout", true);

pub const SOCKET_TOKEN: EndpointDescriptor =
    endpoint("socket token", HttpMethod::Get, "/user/token", true);

// ---------------------------------------------------------------------------
// Conversations
// ---------------------------------------------------------------------------

pub const NEW_CONVERSATION: EndpointDescriptor =
    endpoint("new conversation", HttpMethod::Post, "/conversations/new", true);

pub const GET_CONVERSATIONS: EndpointDescriptor =
    endpoint("get conversations", HttpMethod::Get, "/conversations/get", true);

pub const SEARCH_CONVERSATIONS: EndpointDescriptor =
    endpoint("search conversations", HttpMethod::Get, "/conversations/search", true);

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const SEND_MESSAGE: EndpointDescriptor =
    endpoint("send message", HttpMethod::Post, "/message/send", true);

pub const GET_MESSAGES: EndpointDescriptor =
    endpoint("get messages", HttpMethod::Get, "/message/get", true);

pub const READ_MESSAGE: EndpointDescriptor =
    endpoint("read message", HttpMethod::Get, "/message/read", true);

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

pub const ACCOUNT_INFORMATIONS: EndpointDescriptor = endpoint(
    "account informations",
    HttpMethod::Get,
    "/user/account/informations",
    true,
);

pub const CHANGE_DESCRIPTION: EndpointDescriptor =
    endpoint("change description", HttpMethod::Post, "/user/description", true);

pub const CHANGE_USERNAME: EndpointDescriptor =
    endpoint("change username", HttpMethod::Post, "/user/username", true);

/// Every known endpoint, grouped as auth, conversation, message, user.
pub const ALL: &[EndpointDescriptor] = &[
    REGISTER,
    LOGIN,
    LOGOUT,
    SOCKET_TOKEN,
    NEW_CONVERSATION,
    GET_CONVERSATIONS,
    SEARCH_CONVERSATIONS,
    SEND_MESSAGE,
    GET_MESSAGES,
    READ_MESSAGE,
    ACCOUNT_INFORMATIONS,
    CHANGE_DESCRIPTION,
    CHANGE_USERNAME,
];

/// Find an endpoint by its logical name, e.g. `"get conversations"`.
pub fn lookup(name: &str) -> Option<&'static EndpointDescriptor> {
    ALL.iter().find(|e| e.name == name)
}
