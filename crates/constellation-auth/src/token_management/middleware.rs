//! The authentication stage: attaches the access token to requests that require one.

use constellation_api_base::AuthRequired;
use constellation_core::auth::{RefreshError, RefreshOutcome, TokenStore};
use reqwest_middleware::Middleware;

use super::TokenRefreshService;

/// Attaches `authorization: <access token>` to requests marked with [AuthRequired].
///
/// The token held in the [TokenStore] is used as-is. When the store is empty a refresh is awaited
/// first; if no credentials are stored the request is sent without the header and the server
/// decides. A failed refresh fails the request. Responses are never inspected.
pub struct AuthenticationMiddleware {
    tokens: TokenStore,
    refresh: TokenRefreshService,
}

impl AuthenticationMiddleware {
    #[allow(missing_docs)]
    pub fn new(tokens: TokenStore, refresh: TokenRefreshService) -> Self {
        Self { tokens, refresh }
    }

    async fn get_token(&self) -> Result<Option<String>, RefreshError> {
        if let Some(token) = self.tokens.access_token() {
            return Ok(Some(token));
        }

        Ok(match self.refresh.refresh().await? {
            RefreshOutcome::Refreshed(pair) => Some(pair.access_token),
            RefreshOutcome::NoCredentials => None,
        })
    }
}

#[async_trait::async_trait]
impl Middleware for AuthenticationMiddleware {
    async fn handle(
        &self,
        mut req: reqwest::Request,
        ext: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> Result<reqwest::Response, reqwest_middleware::Error> {
        match ext.get::<AuthRequired>() {
            Some(AuthRequired::Bearer) => match self.get_token().await {
                Ok(Some(token)) => set_authorization(&mut req, &token),
                Ok(None) => {
                    tracing::warn!("No token available for request requiring authentication");
                }
                Err(e) => {
                    tracing::warn!("Failed to get auth token: {e}");
                    return Err(reqwest_middleware::Error::middleware(e));
                }
            },
            None => (),
        }

        next.run(req, ext).await
    }
}

/// Replaces the `authorization` header with the raw token.
pub(crate) fn set_authorization(req: &mut reqwest::Request, token: &str) {
    match token.parse() {
        Ok(header_value) => {
            req.headers_mut()
                .insert(http::header::AUTHORIZATION, header_value);
        }
        Err(e) => {
            tracing::warn!("Failed to parse auth token for header: {e}");
        }
    }
}
