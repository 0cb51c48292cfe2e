use std::sync::Arc;

use constellation_api_base::Configuration;

use crate::{
    ClientSettings,
    auth::{RefreshError, RefreshOutcome, TokenHandler, TokenStore},
    http::CookieStore,
};

/// Shared state behind every clone of a [Client](super::Client).
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) tokens: TokenStore,
    pub(crate) cookies: Arc<dyn CookieStore>,

    /// Configuration whose client carries the full middleware chain. Used for GraphQL.
    pub(crate) api_config: Configuration,
    /// Configuration whose client only injects cookies. Used for the refresh endpoint and for
    /// anything that must never trigger a refresh itself.
    pub(crate) refresh_config: Configuration,

    pub(crate) token_handler: Arc<dyn TokenHandler>,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("base_url", &self.settings.base_url)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl InternalClient {
    #[allow(missing_docs)]
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The access-token slot shared with the authentication middleware.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Persistent storage for the refresh token and account identifier.
    pub fn cookies(&self) -> &Arc<dyn CookieStore> {
        &self.cookies
    }

    #[allow(missing_docs)]
    pub fn get_api_configuration(&self) -> &Configuration {
        &self.api_config
    }

    #[allow(missing_docs)]
    pub fn get_refresh_configuration(&self) -> &Configuration {
        &self.refresh_config
    }

    #[allow(missing_docs)]
    pub fn token_handler(&self) -> &Arc<dyn TokenHandler> {
        &self.token_handler
    }

    /// Force a token refresh through the installed [TokenHandler].
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        self.token_handler.refresh().await
    }

    /// Returns true when an access token is held in memory.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.access_token().is_some()
    }
}
