//! Error types for the Ake client.
//!
//! # Design
//! `ApiError` covers failures that are returned to the caller as `Err`:
//! building a request that cannot be sent, and response bodies that are not
//! valid JSON. Transport failures and HTTP error statuses are *not* errors at
//! this level; the normalizer turns them into a `ResponseOutcome` value so
//! every endpoint shares one result contract.
//!
//! `TransportFailure` is what a `Transport` reports when no HTTP response was
//! obtained at all.

use thiserror::Error;

/// Errors returned by the request builder and the response normalizer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An endpoint requiring authentication was called in token mode without
    /// a non-empty credential.
    #[error("endpoint {endpoint} requires a bearer token in token auth mode")]
    MissingCredential { endpoint: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The response body was not valid JSON, or did not match the expected
    /// envelope.
    #[error("deserialization failed (HTTP {status}): {message}")]
    DeserializationError { status: u16, message: String },

    /// The client configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures raised by a `Transport` before any HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFailure {
    /// The remote host actively refused the connection.
    #[error("connection refused")]
    ConnectionRefused,

    /// The request URL could not be parsed by the transport.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Any other low-level failure (DNS, TLS, timeout, broken pipe...).
    #[error("{0}")]
    Other(String),
}
