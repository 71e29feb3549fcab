//! Response normalization.
//!
//! # Design
//! Every raw transport outcome goes through `normalize`, which classifies it
//! into one `ResponseOutcome`. Endpoint wrappers never look at status codes
//! themselves; they decode the normalized value into an `ApiResponse`.
//!
//! Transport failures and routing 404s are values, not errors: callers get
//! `{"status": "Error", ...}` envelopes for them. Only a body that is not
//! valid JSON is an `Err`, because it means client and server disagree on the
//! protocol.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, TransportFailure};
use crate::http::HttpResponse;

/// Message returned for a 404, which the Ake API only produces for unknown
/// routes.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "This route doesn't exist on this Ake server";

const CONNECTION_REFUSED_MESSAGE: &str = "ECONNREFUSED";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    ConnectionRefused,
    NotFound,
    Other,
}

/// The uniform result of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    Success { status: u16, body: Value },
    HttpError { status: u16, body: Value },
    TransportError { kind: TransportErrorKind, detail: String },
}

/// Classify a raw transport outcome.
///
/// # Errors
/// Returns `ApiError::DeserializationError` when an HTTP response other than
/// a 404 carries a body that is not valid JSON.
pub fn normalize(
    outcome: Result<HttpResponse, TransportFailure>,
) -> Result<ResponseOutcome, ApiError> {
    let response = match outcome {
        Ok(response) => response,
        Err(TransportFailure::ConnectionRefused) => {
            return Ok(ResponseOutcome::TransportError {
                kind: TransportErrorKind::ConnectionRefused,
                detail: CONNECTION_REFUSED_MESSAGE.to_string(),
            });
        }
        Err(other) => {
            return Ok(ResponseOutcome::TransportError {
                kind: TransportErrorKind::Other,
                detail: other.to_string(),
            });
        }
    };

    if response.status == 404 {
        return Ok(ResponseOutcome::TransportError {
            kind: TransportErrorKind::NotFound,
            detail: ROUTE_NOT_FOUND_MESSAGE.to_string(),
        });
    }

    let body = parse_json(&response)?;
    if response.is_success() {
        Ok(ResponseOutcome::Success {
            status: response.status,
            body,
        })
    } else {
        Ok(ResponseOutcome::HttpError {
            status: response.status,
            body,
        })
    }
}

fn parse_json(response: &HttpResponse) -> Result<Value, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError {
        status: response.status,
        message: e.to_string(),
    })
}

impl ResponseOutcome {
    /// HTTP status of the response, if one was received. Routing 404s report
    /// `Some(404)`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseOutcome::Success { status, .. } | ResponseOutcome::HttpError { status, .. } => {
                Some(*status)
            }
            ResponseOutcome::TransportError {
                kind: TransportErrorKind::NotFound,
                ..
            } => Some(404),
            ResponseOutcome::TransportError { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResponseOutcome::Success { .. })
    }

    /// Render the outcome as the JSON value callers of the SDK see.
    ///
    /// Server bodies pass through untouched. Transport failures become an
    /// `{"status": "Error", "message": ...}` envelope; a routing 404 also
    /// carries `"statusCode": 404`.
    pub fn into_value(self) -> Value {
        match self {
            ResponseOutcome::Success { body, .. } | ResponseOutcome::HttpError { body, .. } => body,
            ResponseOutcome::TransportError {
                kind: TransportErrorKind::NotFound,
                detail,
            } => json!({ "status": "Error", "statusCode": 404, "message": detail }),
            ResponseOutcome::TransportError { detail, .. } => {
                json!({ "status": "Error", "message": detail })
            }
        }
    }

    /// Decode the outcome into a typed envelope.
    ///
    /// # Errors
    /// Returns `ApiError::DeserializationError` when the server body does not
    /// match `ApiResponse<T>`.
    pub fn into_response<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        let status = self.status().unwrap_or(0);
        serde_json::from_value(self.into_value()).map_err(|e| ApiError::DeserializationError {
            status,
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Caller-facing envelope
// ---------------------------------------------------------------------------

/// The `status` vocabulary of the Ake API. `Error` is produced client-side
/// for transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiStatus {
    Created,
    Ok,
    #[serde(rename = "Bad Request")]
    BadRequest,
    Unauthorized,
    Conflict,
    #[serde(rename = "Precondition Failed")]
    PreconditionFailed,
    #[serde(rename = "Internal Server Error")]
    InternalServerError,
    Error,
}

/// One error reported by the server. Validation failures name the offending
/// `field` and the `rule` it broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiErrors {
    Single(ErrorDetail),
    Many(Vec<ErrorDetail>),
}

impl ApiErrors {
    pub fn details(&self) -> &[ErrorDetail] {
        match self {
            ApiErrors::Single(detail) => std::slice::from_ref(detail),
            ApiErrors::Many(details) => details,
        }
    }
}

/// The JSON envelope every Ake operation resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T = Value> {
    pub status: ApiStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ApiErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}
