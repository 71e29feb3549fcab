use crate::client::AkeClient;
use crate::endpoint;
use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{
    GetConversationParameters, NewConversationParameters, SearchConversationParameters,
};

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn new_conversation_spec(
    credential: Option<&str>,
    params: &NewConversationParameters,
) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::NEW_CONVERSATION)
        .credential(credential)
        .json_body(params)
}

pub fn get_conversations_spec(
    credential: Option<&str>,
    params: &GetConversationParameters,
) -> RequestSpec {
    RequestSpec::new(&endpoint::GET_CONVERSATIONS)
        .credential(credential)
        .param("offset", params.offset)
}

pub fn search_conversations_spec(
    credential: Option<&str>,
    params: &SearchConversationParameters,
) -> RequestSpec {
    RequestSpec::new(&endpoint::SEARCH_CONVERSATIONS)
        .credential(credential)
        .param("offset", params.offset)
        .param("query", params.query.as_deref())
}

#[derive(Debug)]
pub struct ConversationApi<'a, T> {
    client: &'a AkeClient<T>,
}

impl<'a, T: Transport> ConversationApi<'a, T> {
    pub(crate) fn new(client: &'a AkeClient<T>) -> Self {
        Self { client }
    }

    /// Start a conversation with `participants_without_creator`; `content` is
    /// the first message.
    ///
    /// # Errors
    /// See [`AkeClient::call`].
    pub fn new_conversation(
        &self,
        credential: Option<&str>,
        params: &NewConversationParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&new_conversation_spec(credential, params)?)
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn get(
        &self,
        credential: Option<&str>,
        params: &GetConversationParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&get_conversations_spec(credential, params))
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn search(
        &self,
        credential: Option<&str>,
        params: &SearchConversationParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&search_conversations_spec(credential, params))
    }
}
