use constellation_core::{
    ApiError, Client, MissingFieldError,
    auth::CredentialPair,
    graphql::execute,
    http::{ACCOUNT_ID_COOKIE, Cookie, CookieError, REFRESH_TOKEN_COOKIE},
    require,
};
use thiserror::Error;
use tracing::info;

use super::{
    models::{LoginRequest, LoginResponse},
    mutation::{LoginMutation, LoginVariables},
};

/// Errors that can occur while logging in.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The request was rejected locally, nothing was sent.
    #[error("{0}")]
    Validation(String),
    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The credentials could not be stored.
    #[error(transparent)]
    Cookie(#[from] CookieError),
    #[allow(missing_docs)]
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

/// Client for authenticating Constellation admins.
///
/// # Example
///
/// ```rust,no_run
/// # use constellation_auth::{AuthClientExt, login::models::LoginRequest};
/// # use constellation_core::Client;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new(None);
/// let response = client
///     .auth()
///     .login()
///     .login(LoginRequest::new("admin@example.com", "password"))
///     .await?;
/// println!("Logged in as {}", response.account_id);
/// # Ok(())
/// # }
/// ```
pub struct LoginClient {
    pub(crate) client: Client,
}

impl LoginClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Logs in with e-mail and password.
    ///
    /// The request is validated first; an invalid e-mail never reaches the server. On success the
    /// refresh token and account id are written as cookies, then the credential pair is published
    /// to the token store. If a cookie cannot be written the client stays logged out.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, LoginError> {
        request.validate_input()?;

        let internal = &self.client.internal;
        let data = execute::<LoginMutation>(
            internal.get_api_configuration(),
            &LoginVariables::from(request),
            false,
        )
        .await?;

        let payload = require!(data.auth.login_jwt);
        let tokens = require!(payload.jwt_tokens);
        let account_id = require!(payload.account_id);

        let cookies = internal.cookies();
        cookies
            .set_cookie(Cookie::credential(
                REFRESH_TOKEN_COOKIE,
                tokens.refresh_token.clone(),
            ))
            .await?;
        cookies
            .set_cookie(Cookie::credential(ACCOUNT_ID_COOKIE, account_id.clone()))
            .await?;

        internal
            .tokens()
            .set(CredentialPair::new(tokens.access_token, tokens.refresh_token));

        info!("Logged in");
        Ok(LoginResponse { account_id })
    }
}
