//! Blocking client SDK for the Ake messaging service.
//!
//! # Overview
//! Every endpoint (auth, conversations, messages, user) goes through one
//! dispatch path: a `RequestSpec` is built into an `HttpRequest`, sent by a
//! `Transport`, and the raw outcome is normalized into a `ResponseOutcome`.
//!
//! # Design
//! - `ClientConfig` is immutable; `AkeClient` holds it and a transport and
//!   carries no other state, so one client can serve concurrent callers.
//! - Building and normalizing are pure. Only `Transport::send` does I/O, and
//!   callers can drive their own I/O with `AkeClient::build` and `normalize`.
//! - Bearer headers are attached only for authenticated endpoints in token
//!   mode; session mode leaves authentication to the transport's cookies.
//! - Connection refusals and routing 404s are values, not errors. Malformed
//!   JSON bodies are errors.
//!
//! ```no_run
//! use ake_core::{AkeClient, AuthMode, ClientConfig, GetConversationParameters, LoginParameters};
//!
//! # fn main() -> Result<(), ake_core::ApiError> {
//! let client = AkeClient::new(ClientConfig::new("http://localhost:3333", AuthMode::Token));
//! let login = client.auth().login(&LoginParameters {
//!     email: "marin@ake-app.com".to_string(),
//!     password: "secret".to_string(),
//! })?;
//! let token = login.data.map(|d| d.token.token);
//! let conversations = client
//!     .conversation()
//!     .get(token.as_deref(), &GetConversationParameters { offset: Some(0) })?;
//! println!("{:?}", conversations.status);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

pub use client::AkeClient;
pub use config::{AuthMode, ClientConfig, USER_AGENT};
pub use endpoint::EndpointDescriptor;
pub use error::{ApiError, TransportFailure};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::{build_request, RequestSpec, Scalar};
pub use response::{
    normalize, ApiErrors, ApiResponse, ApiStatus, ErrorDetail, ResponseOutcome, TransportErrorKind,
};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{
    AccessToken, AccountInformationsParameters, ChangeDescriptionParameters,
    ChangeUsernameParameters, GetConversationParameters, GetMessagesParameters, LoginParameters,
    NewConversationParameters, ReadMessageParameters, RegisterParameters,
    SearchConversationParameters, SendMessageParameters, SocketToken, TokenEnvelope,
};
