use constellation_core::{
    Client,
    auth::{RefreshError, RefreshOutcome},
    http::{ACCESS_TOKEN_COOKIE, ACCOUNT_ID_COOKIE, CookieError, REFRESH_TOKEN_COOKIE},
};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::login::LoginClient;

/// Errors that can occur while logging out.
#[derive(Debug, Error)]
pub enum LogoutError {
    /// The stored credentials could not be removed.
    #[error(transparent)]
    Cookie(#[from] CookieError),
}

/// What is currently known about the session, without contacting the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// An access token is held in memory.
    pub has_access_token: bool,
    /// A refresh token is stored.
    pub has_refresh_token: bool,
    /// The stored account identifier.
    pub account_id: Option<String>,
}

/// Subclient containing auth functionality.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) client: Client,
}

impl AuthClient {
    /// Constructs a new `AuthClient` with the given `Client`.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Client for login functionality
    pub fn login(&self) -> LoginClient {
        LoginClient::new(self.client.clone())
    }

    /// Exchange the stored refresh token for a new credential pair.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        self.client.internal.refresh().await
    }

    /// Forget the session: the in-memory token and every credential cookie. Calling this when
    /// already logged out is not an error.
    pub async fn logout(&self) -> Result<(), LogoutError> {
        let internal = &self.client.internal;
        internal.tokens().clear();

        let cookies = internal.cookies();
        for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, ACCOUNT_ID_COOKIE] {
            cookies.remove_cookie(name).await?;
        }

        info!("Logged out");
        Ok(())
    }

    /// Report which credentials are present.
    pub async fn status(&self) -> Result<SessionStatus, CookieError> {
        let internal = &self.client.internal;
        let cookies = internal.cookies();

        Ok(SessionStatus {
            has_access_token: internal.is_authenticated(),
            has_refresh_token: cookies.get_value(REFRESH_TOKEN_COOKIE).await?.is_some(),
            account_id: cookies.get_value(ACCOUNT_ID_COOKIE).await?,
        })
    }
}

/// Extension trait for `Client` to provide access to the `AuthClient`.
pub trait AuthClientExt {
    /// Creates a new `AuthClient` instance.
    fn auth(&self) -> AuthClient;
}

impl AuthClientExt for Client {
    fn auth(&self) -> AuthClient {
        AuthClient {
            client: self.clone(),
        }
    }
}
