//! The network boundary.
//!
//! # Design
//! The core depends on the network only through the `Transport` trait: one
//! blocking `send` that either returns the HTTP response, whatever its status,
//! or a `TransportFailure` when no response was obtained. Timeouts, TLS and
//! cookie handling are configured on the transport itself.
//!
//! `UreqTransport` is the default implementation, behind the `ureq` feature.

use crate::error::TransportFailure;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP request.
///
/// Implementations must return non-2xx responses as `Ok` so the normalizer
/// can classify them.
pub trait Transport: Send + Sync {
    /// Send `request` and wait for the full response body.
    ///
    /// # Errors
    /// Returns a `TransportFailure` when the request could not be sent or no
    /// response was received.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
        (**self).send(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
mod ureq_transport {
    use std::{fmt, io};

    use super::Transport;
    use crate::error::TransportFailure;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport backed by a `ureq::Agent`.
    ///
    /// The agent is configured so that 4xx/5xx statuses are returned as data
    /// rather than `Err`. Cloning is cheap and clones share the agent's
    /// connection pool.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl fmt::Debug for UreqTransport {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("UreqTransport").finish_non_exhaustive()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }

        /// Use a caller-configured agent, e.g. with timeouts or a proxy. The
        /// agent must not treat HTTP error statuses as errors.
        pub fn with_agent(agent: ureq::Agent) -> Self {
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportFailure> {
            let url = request.url.as_str();
            let result = match (request.method, request.body.as_deref()) {
                (HttpMethod::Get, None) => {
                    let mut builder = self.agent.get(url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.call()
                }
                (HttpMethod::Get, Some(body)) => {
                    let mut builder = self.agent.get(url).force_send_body();
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.send(body.as_bytes())
                }
                (HttpMethod::Post, body) => {
                    let mut builder = self.agent.post(url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    match body {
                        Some(body) => builder.send(body.as_bytes()),
                        None => builder.send_empty(),
                    }
                }
            };

            let mut response = result.map_err(map_error)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response.body_mut().read_to_string().map_err(map_error)?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn map_error(err: ureq::Error) -> TransportFailure {
        match err {
            ureq::Error::Io(e) if e.kind() == io::ErrorKind::ConnectionRefused => {
                TransportFailure::ConnectionRefused
            }
            ureq::Error::BadUri(detail) => TransportFailure::InvalidUrl(detail),
            other => TransportFailure::Other(other.to_string()),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn bad_uri_is_an_invalid_url() {
            let failure = map_error(ureq::Error::BadUri("no scheme".to_string()));
            assert_eq!(failure, TransportFailure::InvalidUrl("no scheme".to_string()));
        }

        #[test]
        fn invalid_header_is_not_an_invalid_url() {
            let err = ureq::http::Request::builder()
                .header("bad header", "value")
                .body(())
                .unwrap_err();
            assert!(matches!(
                map_error(ureq::Error::Http(err)),
                TransportFailure::Other(_)
            ));
        }
    }
}
