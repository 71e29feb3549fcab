//! Decides which authentication material a request carries.
//!
//! Both functions are pure: they only read the client config and the request
//! spec.

use crate::config::{AuthMode, ClientConfig};
use crate::error::ApiError;
use crate::request::RequestSpec;

/// Headers proving the caller's identity.
///
/// An `authorization: Bearer <credential>` header is attached if and only if
/// the endpoint requires authentication and the client runs in token mode.
/// In session mode the cookie jar of the transport authenticates the request,
/// so a supplied credential is ignored.
///
/// # Errors
/// Returns `ApiError::MissingCredential` when a bearer header is required but
/// the `RequestSpec` carries no credential, or an empty one.
pub fn auth_headers(
    config: &ClientConfig,
    spec: &RequestSpec,
) -> Result<Vec<(String, String)>, ApiError> {
    if !spec.requires_auth || config.auth_mode() != AuthMode::Token {
        return Ok(Vec::new());
    }
    match spec.credential.as_deref() {
        Some(token) if !token.is_empty() => Ok(vec![(
            "authorization".to_string(),
            format!("Bearer {token}"),
        )]),
        _ => Err(ApiError::MissingCredential {
            endpoint: spec.path.clone(),
        }),
    }
}

/// Whether `token=true` must be appended to the query string.
pub fn token_flag(config: &ClientConfig, spec: &RequestSpec) -> bool {
    spec.signals_token && config.auth_mode() == AuthMode::Token
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint;

    fn config(mode: AuthMode) -> ClientConfig {
        ClientConfig::new("http://localhost:3333", mode)
    }

    #[test]
    fn public_endpoint_never_gets_a_bearer_header() {
        let spec = RequestSpec::new(&endpoint::LOGIN).credential(Some("tok123"));
        for mode in [AuthMode::Token, AuthMode::Session] {
            assert!(auth_headers(&config(mode), &spec).unwrap().is_empty());
        }
    }

    #[test]
    fn token_mode_attaches_bearer_header() {
        let spec = RequestSpec::new(&endpoint::LOGOUT).credential(Some("tok123"));
        let headers = auth_headers(&config(AuthMode::Token), &spec).unwrap();
        assert_eq!(
            headers,
            vec![("authorization".to_string(), "Bearer tok123".to_string())]
        );
    }

    #[test]
    fn session_mode_ignores_credential() {
        let spec = RequestSpec::new(&endpoint::LOGOUT).credential(Some("tok123"));
        assert!(auth_headers(&config(AuthMode::Session), &spec).unwrap().is_empty());
    }

    #[test]
    fn session_mode_does_not_require_credential() {
        let spec = RequestSpec::new(&endpoint::LOGOUT);
        assert!(auth_headers(&config(AuthMode::Session), &spec).unwrap().is_empty());
    }

    #[test]
    fn token_mode_without_credential_fails_fast() {
        let spec = RequestSpec::new(&endpoint::SOCKET_TOKEN);
        let err = auth_headers(&config(AuthMode::Token), &spec).unwrap_err();
        assert!(
            matches!(err, ApiError::MissingCredential { endpoint } if endpoint == "/user/token")
        );
    }

    #[test]
    fn token_mode_with_empty_credential_fails_fast() {
        let spec = RequestSpec::new(&endpoint::SOCKET_TOKEN).credential(Some(""));
        assert!(auth_headers(&config(AuthMode::Token), &spec).is_err());
    }

    #[test]
    fn token_flag_only_for_signalling_endpoints_in_token_mode() {
        let login = RequestSpec::new(&endpoint::LOGIN);
        let logout = RequestSpec::new(&endpoint::LOGOUT);
        assert!(token_flag(&config(AuthMode::Token), &login));
        assert!(!token_flag(&config(AuthMode::Session), &login));
        assert!(!token_flag(&config(AuthMode::Token), &logout));
    }
}
