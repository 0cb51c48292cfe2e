//! Trait definitions and a basic implementation for attaching and renewing tokens. The complete
//! implementation is located in the `constellation-auth` crate.

use std::{sync::Arc, time::Duration};

use constellation_api_base::Configuration;

use super::{RefreshError, RefreshOutcome, TokenStore};
use crate::http::CookieStore;

/// Everything a [TokenHandler] needs to build its middleware.
#[derive(Clone)]
pub struct TokenHandlerContext {
    /// The shared access-token slot.
    pub tokens: TokenStore,
    /// Persistent storage holding the refresh token and account identifier.
    pub cookies: Arc<dyn CookieStore>,
    /// Configuration for calls to the refresh endpoint. Its client carries no authentication
    /// middleware, so refreshing can never recurse into itself.
    pub refresh_config: Configuration,
    /// Upper bound for a single refresh call.
    pub refresh_timeout: Duration,
}

/// Trait for handling token usage and renewal.
#[async_trait::async_trait]
pub trait TokenHandler: 'static + Send + Sync {
    /// Build the middleware that attaches tokens to requests and recovers from rejected tokens.
    ///
    /// The returned middleware is installed in order, the first element being the outermost
    /// stage. Implementations should only act on requests carrying the
    /// [constellation_api_base::AuthRequired] extension.
    fn initialize_middleware(
        &self,
        context: TokenHandlerContext,
    ) -> Vec<Arc<dyn reqwest_middleware::Middleware>>;

    /// Force a token refresh, publishing the new tokens on success.
    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError>;
}

/// A token handler that does not attach any tokens. Useful for testing or for clients that only
/// call unauthenticated operations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTokenHandler;

#[async_trait::async_trait]
impl TokenHandler for NoopTokenHandler {
    fn initialize_middleware(
        &self,
        _context: TokenHandlerContext,
    ) -> Vec<Arc<dyn reqwest_middleware::Middleware>> {
        Vec::new()
    }

    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        Ok(RefreshOutcome::NoCredentials)
    }
}
