use crate::client::AkeClient;
use crate::endpoint;
use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{GetMessagesParameters, ReadMessageParameters, SendMessageParameters};

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn send_message_spec(
    credential: Option<&str>,
    params: &SendMessageParameters,
) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::SEND_MESSAGE)
        .credential(credential)
        .json_body(params)
}

pub fn get_messages_spec(credential: Option<&str>, params: &GetMessagesParameters) -> RequestSpec {
    RequestSpec::new(&endpoint::GET_MESSAGES)
        .credential(credential)
        .param("convId", Some(params.conv_id))
        .param("offset", params.offset)
}

pub fn read_message_spec(credential: Option<&str>, params: &ReadMessageParameters) -> RequestSpec {
    RequestSpec::new(&endpoint::READ_MESSAGE)
        .credential(credential)
        .param("msgId", Some(params.msg_id))
}

#[derive(Debug)]
pub struct MessageApi<'a, T> {
    client: &'a AkeClient<T>,
}

impl<'a, T: Transport> MessageApi<'a, T> {
    pub(crate) fn new(client: &'a AkeClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn send(
        &self,
        credential: Option<&str>,
        params: &SendMessageParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&send_message_spec(credential, params)?)
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn get(
        &self,
        credential: Option<&str>,
        params: &GetMessagesParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&get_messages_spec(credential, params))
    }

    /// Mark a message as read.
    ///
    /// # Errors
    /// See [`AkeClient::call`].
    pub fn read(
        &self,
        credential: Option<&str>,
        params: &ReadMessageParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&read_message_spec(credential, params))
    }
}
