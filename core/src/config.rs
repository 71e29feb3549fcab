//! Client-wide configuration.
//!
//! `ClientConfig` is built once and never mutated; the client owns it for its
//! whole lifetime, so concurrent requests read it without locking.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Value sent in the `user-agent` header of every request.
pub const USER_AGENT: &str = concat!("ake-sdk@", env!("CARGO_PKG_VERSION"));

/// How authentication is carried on requests.
///
/// In `Session` mode the server tracks the user through cookies managed by
/// the transport, and the client never adds an `authorization` header. In
/// `Token` mode authenticated endpoints carry `Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Session,
    #[default]
    Token,
}

impl FromStr for AuthMode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "session" => Ok(AuthMode::Session),
            "token" => Ok(AuthMode::Token),
            other => Err(ApiError::InvalidConfig(format!(
                "unknown auth mode {other:?}, expected \"session\" or \"token\""
            ))),
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Session => f.write_str("session"),
            AuthMode::Token => f.write_str("token"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    auth_mode: AuthMode,
    base_url: String,
    user_agent: String,
}

impl ClientConfig {
    /// `base_url` is used verbatim as the prefix of every endpoint path, e.g.
    /// `http://localhost:3333`.
    pub fn new(base_url: impl Into<String>, auth_mode: AuthMode) -> Self {
        Self {
            auth_mode,
            base_url: base_url.into(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Load the configuration from `AKE_URL` and `AKE_AUTH_MODE`.
    ///
    /// `AKE_AUTH_MODE` defaults to `token` when unset.
    ///
    /// # Errors
    /// Returns `ApiError::InvalidConfig` if `AKE_URL` is missing or empty, or
    /// if `AKE_AUTH_MODE` is neither `session` nor `token`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = lookup("AKE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ApiError::InvalidConfig("AKE_URL is not set".to_string()))?;
        let auth_mode = match lookup("AKE_AUTH_MODE") {
            Some(mode) => mode.parse()?,
            None => AuthMode::default(),
        };
        Ok(Self::new(base_url, auth_mode))
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth_mode
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
