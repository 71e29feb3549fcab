use crate::client::AkeClient;
use crate::endpoint;
use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{LoginParameters, RegisterParameters, SocketToken, TokenEnvelope};

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn register_spec(params: &RegisterParameters) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::REGISTER).json_body(params)
}

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn login_spec(params: &LoginParameters) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::LOGIN).json_body(params)
}

pub fn logout_spec(credential: Option<&str>) -> RequestSpec {
    RequestSpec::new(&endpoint::LOGOUT).credential(credential)
}

pub fn socket_token_spec(credential: Option<&str>) -> RequestSpec {
    RequestSpec::new(&endpoint::SOCKET_TOKEN).credential(credential)
}

/// Account creation, sign-in and session tokens.
///
/// In token mode, `register` and `login` return a bearer token in
/// `data.token.token`; pass it as the credential of every other call.
#[derive(Debug)]
pub struct AuthApi<'a, T> {
    client: &'a AkeClient<T>,
}

impl<'a, T: Transport> AuthApi<'a, T> {
    pub(crate) fn new(client: &'a AkeClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn register(
        &self,
        params: &RegisterParameters,
    ) -> Result<ApiResponse<TokenEnvelope>, ApiError> {
        self.client.call(&register_spec(params)?)
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn login(&self, params: &LoginParameters) -> Result<ApiResponse<TokenEnvelope>, ApiError> {
        self.client.call(&login_spec(params)?)
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn logout(&self, credential: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.client.call(&logout_spec(credential))
    }

    /// Short-lived token for the realtime socket.
    ///
    /// # Errors
    /// See [`AkeClient::call`].
    pub fn socket_token(
        &self,
        credential: Option<&str>,
    ) -> Result<ApiResponse<SocketToken>, ApiError> {
        self.client.call(&socket_token_spec(credential))
    }
}
