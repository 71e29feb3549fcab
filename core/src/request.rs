//! Request descriptors and the request builder.
//!
//! # Design
//! A `RequestSpec` is an abstract description of one call: which endpoint,
//! which credential, which query parameters and which body. `build_request`
//! turns it into a concrete `HttpRequest` using the client configuration. The
//! builder never touches the network and never injects anything that varies
//! between calls, so building the same `RequestSpec` twice gives equal requests.

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::auth::{auth_headers, token_flag};
use crate::config::ClientConfig;
use crate::endpoint::EndpointDescriptor;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};

/// A query-string value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::UInt(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Str(value.clone())
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value.into())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::UInt(value.into())
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::UInt(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Everything needed to build one request. Constructed per call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub path: String,
    pub method: HttpMethod,
    pub requires_auth: bool,
    pub signals_token: bool,
    pub credential: Option<String>,
    /// Insertion-ordered. Entries with a `None` value are never serialized.
    pub query: Vec<(String, Option<Scalar>)>,
    /// `None` means no body; `Some(json!({}))` is an empty-object body.
    pub body: Option<serde_json::Value>,
}

impl RequestSpec {
    pub fn new(endpoint: &EndpointDescriptor) -> Self {
        Self {
            path: endpoint.path.to_string(),
            method: endpoint.method,
            requires_auth: endpoint.requires_auth,
            signals_token: endpoint.signals_token,
            credential: None,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn credential(mut self, credential: Option<&str>) -> Self {
        self.credential = credential.map(str::to_string);
        self
    }

    pub fn param<V: Into<Scalar>>(mut self, key: &str, value: Option<V>) -> Self {
        self.query.push((key.to_string(), value.map(Into::into)));
        self
    }

    /// Attach `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns `ApiError::SerializationError` if `body` cannot be represented
    /// as JSON.
    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Build the transport-ready request for `spec`.
///
/// The URL is the base URL followed by the endpoint path, verbatim, then the
/// form-urlencoded query. Headers are emitted as `user-agent`, then
/// `authorization` when required, then `content-type` when a body is present.
///
/// # Errors
/// Returns `ApiError::MissingCredential` when the endpoint needs a bearer
/// token that `spec` does not carry, and `ApiError::SerializationError` if
/// the body cannot be encoded.
pub fn build_request(config: &ClientConfig, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
    let mut url = format!("{}{}", config.base_url(), spec.path);

    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut pairs = 0usize;
    if token_flag(config, spec) {
        query.append_pair("token", "true");
        pairs += 1;
    }
    for (key, value) in &spec.query {
        if let Some(value) = value {
            query.append_pair(key, &value.to_string());
            pairs += 1;
        }
    }
    if pairs > 0 {
        url.push('?');
        url.push_str(&query.finish());
    }

    let mut headers = vec![("user-agent".to_string(), config.user_agent().to_string())];
    headers.extend(auth_headers(config, spec)?);

    let body = match &spec.body {
        Some(value) => {
            headers.push(("content-type".to_string(), "application/json".to_string()));
            Some(
                serde_json::to_string(value)
                    .map_err(|e| ApiError::SerializationError(e.to_string()))?,
            )
        }
        None => None,
    };

    Ok(HttpRequest {
        method: spec.method,
        url,
        headers,
        body,
    })
}
