//! The token refresh service: exchanges the stored refresh token for a new credential pair.

use std::sync::{Arc, Mutex};

use constellation_core::{
    auth::{CredentialPair, RefreshError, RefreshOutcome, TokenHandlerContext},
    http::{ACCOUNT_ID_COOKIE, Cookie, CookieError, REFRESH_TOKEN_COOKIE},
};
use futures::{
    FutureExt,
    future::{BoxFuture, Shared, WeakShared},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Path of the refresh endpoint, relative to the configured base path.
pub const REFRESH_PATH: &str = "api/refresh-token";

type RefreshFuture = BoxFuture<'static, Result<RefreshOutcome, RefreshError>>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
    account_id: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Obtains new credentials from the refresh endpoint.
///
/// At most one refresh is in flight per service: callers arriving while a refresh is pending
/// await the same call and observe the same result. Once it settles the next caller starts a new
/// refresh. If every waiter is dropped before the refresh completes, the call is abandoned.
#[derive(Clone)]
pub struct TokenRefreshService {
    inner: Arc<Inner>,
}

struct Inner {
    context: TokenHandlerContext,
    in_flight: Mutex<Option<WeakShared<RefreshFuture>>>,
}

impl TokenRefreshService {
    #[allow(missing_docs)]
    pub fn new(context: TokenHandlerContext) -> Self {
        Self {
            inner: Arc::new(Inner {
                context,
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Refreshes the credentials, joining a refresh that is already in flight.
    ///
    /// Returns [RefreshOutcome::NoCredentials] without touching the network when the refresh
    /// token or the account identifier is missing. On success the new pair has been published to
    /// the token store and the refresh-token cookie before this returns.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        self.join_or_start().await
    }

    fn join_or_start(&self) -> Shared<RefreshFuture> {
        let mut slot = self.inner.in_flight.lock().expect("Mutex is not poisoned");

        if let Some(pending) = slot.as_ref().and_then(WeakShared::upgrade) {
            debug!("Joining in-flight token refresh");
            return pending;
        }

        let inner = self.inner.clone();
        let refresh = async move {
            let result = inner.perform_refresh().await;
            *inner.in_flight.lock().expect("Mutex is not poisoned") = None;
            result
        }
        .boxed()
        .shared();

        *slot = refresh.downgrade();
        refresh
    }
}

impl Inner {
    async fn perform_refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        let cookies = &self.context.cookies;
        let refresh_token = cookies
            .get_value(REFRESH_TOKEN_COOKIE)
            .await
            .map_err(storage_error)?;
        let account_id = cookies
            .get_value(ACCOUNT_ID_COOKIE)
            .await
            .map_err(storage_error)?;

        let (Some(refresh_token), Some(account_id)) = (refresh_token, account_id) else {
            debug!("No refresh token or account id stored, skipping refresh");
            return Ok(RefreshOutcome::NoCredentials);
        };

        let config = &self.context.refresh_config;
        debug!("Requesting new access token");
        let response = config
            .client
            .post(config.url(REFRESH_PATH))
            .timeout(self.context.refresh_timeout)
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
                account_id: &account_id,
            })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%status, "Token refresh rejected");
            return Err(RefreshError::Network {
                status: Some(status.as_u16()),
                message: format!("{status}: {message}"),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                RefreshError::Timeout
            } else {
                RefreshError::Network {
                    status: Some(status.as_u16()),
                    message: e.to_string(),
                }
            }
        })?;
        let pair = parse_refresh_response(&body)?;

        self.context.tokens.set(pair.clone());
        cookies
            .set_cookie(Cookie::credential(
                REFRESH_TOKEN_COOKIE,
                pair.refresh_token.clone(),
            ))
            .await
            .map_err(storage_error)?;

        info!("Access token refreshed");
        Ok(RefreshOutcome::Refreshed(pair))
    }
}

fn parse_refresh_response(body: &[u8]) -> Result<CredentialPair, RefreshError> {
    let response: RefreshResponse = serde_json::from_slice(body)
        .map_err(|e| RefreshError::MalformedResponse(e.to_string()))?;

    let access_token = response
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RefreshError::MalformedResponse("missing accessToken".to_string()))?;
    let refresh_token = response
        .refresh_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| RefreshError::MalformedResponse("missing refreshToken".to_string()))?;

    Ok(CredentialPair::new(access_token, refresh_token))
}

fn transport_error(e: reqwest_middleware::Error) -> RefreshError {
    match e {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => RefreshError::Timeout,
        e => RefreshError::Network {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        },
    }
}

fn storage_error(e: CookieError) -> RefreshError {
    RefreshError::Storage(e.to_string())
}
