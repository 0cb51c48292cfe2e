//! The error-handling stage: refreshes and replays requests the server rejected as
//! unauthenticated.

use constellation_api_base::AuthRequired;
use constellation_core::{
    MissingCredentialsError,
    auth::RefreshOutcome,
    graphql::has_unauthenticated_error,
};
use reqwest_middleware::Middleware;
use tracing::{debug, warn};

use super::{TokenRefreshService, middleware::set_authorization};

/// Replays a request once after a token refresh when its response carries an `UNAUTHENTICATED`
/// GraphQL error.
///
/// Only requests marked with [AuthRequired] are considered. Their response body is buffered and
/// classified; anything that is not an unauthenticated signal is handed back with the same
/// status, version, headers and body. On the signal:
///
/// - a successful refresh replays the original request with the new token through the remaining
///   stages, exactly once, and returns whatever that produces,
/// - missing credentials fail the request with [MissingCredentialsError],
/// - a failed refresh fails the request with the refresh error.
pub struct UnauthenticatedRetryMiddleware {
    refresh: TokenRefreshService,
}

impl UnauthenticatedRetryMiddleware {
    #[allow(missing_docs)]
    pub fn new(refresh: TokenRefreshService) -> Self {
        Self { refresh }
    }
}

#[async_trait::async_trait]
impl Middleware for UnauthenticatedRetryMiddleware {
    async fn handle(
        &self,
        req: reqwest::Request,
        ext: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> Result<reqwest::Response, reqwest_middleware::Error> {
        if ext.get::<AuthRequired>().is_none() {
            return next.run(req, ext).await;
        }

        let Some(mut replay) = req.try_clone() else {
            warn!("Request body cannot be cloned, an unauthenticated response will not be replayed");
            return next.run(req, ext).await;
        };

        let response = next.clone().run(req, ext).await?;
        let (response, unauthenticated) = buffer_and_classify(response).await?;
        if !unauthenticated {
            return Ok(response);
        }

        debug!("Server rejected the access token, refreshing before replay");
        match self.refresh.refresh().await {
            Ok(RefreshOutcome::Refreshed(pair)) => {
                set_authorization(&mut replay, &pair.access_token);
                next.run(replay, ext).await
            }
            Ok(RefreshOutcome::NoCredentials) => {
                warn!("Cannot replay unauthenticated request without stored credentials");
                Err(reqwest_middleware::Error::middleware(MissingCredentialsError))
            }
            Err(e) => {
                warn!("Failed to refresh token for replay: {e}");
                Err(reqwest_middleware::Error::middleware(e))
            }
        }
    }
}

/// Reads the whole body and returns an equivalent response along with whether it signals an
/// unauthenticated request.
async fn buffer_and_classify(
    response: reqwest::Response,
) -> Result<(reqwest::Response, bool), reqwest_middleware::Error> {
    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();

    let body = response.bytes().await?;
    let unauthenticated = has_unauthenticated_error(&body);

    let mut rebuilt = http::Response::new(body);
    *rebuilt.status_mut() = status;
    *rebuilt.version_mut() = version;
    *rebuilt.headers_mut() = headers;

    Ok((reqwest::Response::from(rebuilt), unauthenticated))
}
