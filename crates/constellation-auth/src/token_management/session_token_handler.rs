//! Token handler for session based authentication with a refresh token cookie.

use std::sync::{Arc, RwLock};

use constellation_core::auth::{
    RefreshError, RefreshOutcome, TokenHandler, TokenHandlerContext,
};

use super::{AuthenticationMiddleware, TokenRefreshService, UnauthenticatedRetryMiddleware};

/// Token handler that authenticates requests with the in-memory access token and recovers from
/// expired sessions using the refresh token and account id stored as cookies.
///
/// Installs two stages, outermost first: [UnauthenticatedRetryMiddleware] and
/// [AuthenticationMiddleware]. Both share a single [TokenRefreshService], so a refresh triggered
/// by either stage, or by [TokenHandler::refresh], is never duplicated.
///
/// Every [TokenHandler::initialize_middleware] call binds a new refresh service to the client
/// being built. [TokenHandler::refresh] goes through the most recently bound one.
#[derive(Clone, Default)]
pub struct SessionTokenHandler {
    refresh: Arc<RwLock<Option<TokenRefreshService>>>,
}

impl SessionTokenHandler {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TokenHandler for SessionTokenHandler {
    fn initialize_middleware(
        &self,
        context: TokenHandlerContext,
    ) -> Vec<Arc<dyn reqwest_middleware::Middleware>> {
        let tokens = context.tokens.clone();
        let refresh = TokenRefreshService::new(context);
        *self.refresh.write().expect("RwLock is not poisoned") = Some(refresh.clone());

        vec![
            Arc::new(UnauthenticatedRetryMiddleware::new(refresh.clone())),
            Arc::new(AuthenticationMiddleware::new(tokens, refresh)),
        ]
    }

    async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let service = self.refresh.read().expect("RwLock is not poisoned").clone();
        match service {
            Some(service) => service.refresh().await,
            None => {
                tracing::warn!("Token handler used before the client was initialized");
                Ok(RefreshOutcome::NoCredentials)
            }
        }
    }
}
