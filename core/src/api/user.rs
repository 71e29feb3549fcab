use crate::client::AkeClient;
use crate::endpoint;
use crate::error::ApiError;
use crate::request::RequestSpec;
use crate::response::ApiResponse;
use crate::transport::Transport;
use crate::types::{
    AccountInformationsParameters, ChangeDescriptionParameters, ChangeUsernameParameters,
};

pub fn account_informations_spec(
    credential: Option<&str>,
    params: &AccountInformationsParameters,
) -> RequestSpec {
    RequestSpec::new(&endpoint::ACCOUNT_INFORMATIONS)
        .credential(credential)
        .param("userId", params.user_id.filter(|id| *id != 0))
}

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn change_description_spec(
    credential: Option<&str>,
    params: &ChangeDescriptionParameters,
) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::CHANGE_DESCRIPTION)
        .credential(credential)
        .json_body(params)
}

/// # Errors
/// Returns `ApiError::SerializationError` if the parameters cannot be encoded.
pub fn change_username_spec(
    credential: Option<&str>,
    params: &ChangeUsernameParameters,
) -> Result<RequestSpec, ApiError> {
    RequestSpec::new(&endpoint::CHANGE_USERNAME)
        .credential(credential)
        .json_body(params)
}

#[derive(Debug)]
pub struct UserApi<'a, T> {
    client: &'a AkeClient<T>,
}

impl<'a, T: Transport> UserApi<'a, T> {
    pub(crate) fn new(client: &'a AkeClient<T>) -> Self {
        Self { client }
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn account_informations(
        &self,
        credential: Option<&str>,
        params: &AccountInformationsParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&account_informations_spec(credential, params))
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn change_description(
        &self,
        credential: Option<&str>,
        params: &ChangeDescriptionParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&change_description_spec(credential, params)?)
    }

    /// # Errors
    /// See [`AkeClient::call`].
    pub fn change_username(
        &self,
        credential: Option<&str>,
        params: &ChangeUsernameParameters,
    ) -> Result<ApiResponse, ApiError> {
        self.client.call(&change_username_spec(credential, params)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client, StubTransport};
    use crate::config::AuthMode;

    #[test]
    fn account_informations_for_self_has_no_query() {
        let c = client(AuthMode::Token, StubTransport::replying(200, r#"{"status":"Ok"}"#));
        c.user()
            .account_informations(Some("tok"), &AccountInformationsParameters::default())
            .unwrap();
        assert_eq!(
            c.transport().last().url,
            "http://localhost:3333/user/account/informations"
        );
    }

    #[test]
    fn account_informations_for_other_user() {
        let c = client(AuthMode::Token, StubTransport::replying(200, r#"{"status":"Ok"}"#));
        c.user()
            .account_informations(Some("tok"), &AccountInformationsParameters { user_id: Some(5) })
            .unwrap();
        assert_eq!(
            c.transport().last().url,
            "http://localhost:3333/user/account/informations?userId=5"
        );
    }

    #[test]
    fn zero_user_id_is_treated_as_self() {
        let c = client(AuthMode::Token, StubTransport::replying(200, r#"{"status":"Ok"}"#));
        c.user()
            .account_informations(Some("tok"), &AccountInformationsParameters { user_id: Some(0) })
            .unwrap();
        assert_eq!(
            c.transport().last().url,
            "http://localhost:3333/user/account/informations"
        );
    }

    #[test]
    fn change_username_posts_body() {
        let c = client(AuthMode::Token, StubTransport::replying(200, r#"{"status":"Ok"}"#));
        c.user()
            .change_username(Some("tok"), &ChangeUsernameParameters { username: "neo".to_string() })
            .unwrap();
        assert_eq!(c.transport().last().body.as_deref(), Some(r#"{"username":"neo"}"#));
    }

    #[test]
    fn change_description_without_token_fails_in_token_mode() {
        let c = client(AuthMode::Token, StubTransport::replying(200, "{}"));
        let err = c
            .user()
            .change_description(None, &ChangeDescriptionParameters { description: "x".to_string() })
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingCredential { .. }));
    }
}
