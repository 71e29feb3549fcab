//! The Ake client and its single dispatch path.
//!
//! # Design
//! `AkeClient` holds an immutable `ClientConfig` and a `Transport`, and
//! nothing else. Every endpoint goes through `request`: build the
//! `HttpRequest`, send it (the only blocking step), normalize the outcome.
//! The build and normalize halves stay public so a caller can drive its own
//! I/O between them.
//!
//! Endpoint wrappers are grouped into borrowed views (`auth()`,
//! `conversation()`, `message()`, `user()`) that capture no state of their
//! own.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::{AuthApi, ConversationApi, MessageApi, UserApi};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::request::{build_request, RequestSpec};
use crate::response::{normalize, ApiResponse, ResponseOutcome};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct AkeClient<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "ureq")]
impl AkeClient<crate::transport::UreqTransport> {
    /// Client backed by a default `UreqTransport`.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> AkeClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the transport-ready request for `spec` without sending it.
    ///
    /// # Errors
    /// See [`build_request`].
    pub fn build(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        build_request(&self.config, spec)
    }

    /// Build, send and normalize one request. Never retried.
    ///
    /// Transport failures and HTTP error statuses come back as
    /// `ResponseOutcome` values.
    ///
    /// # Errors
    /// Returns an `ApiError` if the request cannot be built or the response
    /// body is not valid JSON.
    pub fn request(&self, spec: &RequestSpec) -> Result<ResponseOutcome, ApiError> {
        let request = self.build(spec)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let outcome = self.transport.send(&request);
        if let Err(failure) = &outcome {
            warn!(
                method = %request.method,
                url = %request.url,
                error = %failure,
                "transport failure"
            );
        }

        let normalized = normalize(outcome)?;
        debug!(url = %request.url, status = ?normalized.status(), "request resolved");
        Ok(normalized)
    }

    /// Dispatch `spec` and decode the outcome into a typed envelope.
    ///
    /// # Errors
    /// As [`AkeClient::request`], plus `ApiError::DeserializationError` when
    /// the body does not match `ApiResponse<R>`.
    pub fn call<R: DeserializeOwned>(
        &self,
        spec: &RequestSpec,
    ) -> Result<ApiResponse<R>, ApiError> {
        self.request(spec)?.into_response()
    }

    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi::new(self)
    }

    pub fn conversation(&self) -> ConversationApi<'_, T> {
        ConversationApi::new(self)
    }

    pub fn message(&self) -> MessageApi<'_, T> {
        MessageApi::new(self)
    }

    pub fn user(&self) -> UserApi<'_, T> {
        UserApi::new(self)
    }
}
