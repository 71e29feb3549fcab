//! Endpoint wrappers, grouped the way the Ake API groups its routes.
//!
//! Each group has pure `*_spec` functions that turn typed parameters into a
//! `RequestSpec`, and a view borrowed from the client (`client.auth()`, ...)
//! that dispatches those specs and decodes the envelope.

mod auth;
mod conversation;
mod message;
mod user;

pub use auth::{login_spec, logout_spec, register_spec, socket_token_spec, AuthApi};
pub use conversation::{
    get_conversations_spec, new_conversation_spec, search_conversations_spec, ConversationApi,
};
pub use message::{get_messages_spec, read_message_spec, send_message_spec, MessageApi};
pub use user::{account_informations_spec, change_description_spec, change_username_spec, UserApi};
