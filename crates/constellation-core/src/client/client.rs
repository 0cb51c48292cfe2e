use std::sync::Arc;

use constellation_api_base::Configuration;

use super::internal::InternalClient;
use crate::{
    ClientSettings,
    auth::{NoopTokenHandler, TokenHandler, TokenHandlerContext, TokenStore},
    http::{CookieInjectionMiddleware, CookieStore, InMemoryCookieStore},
};

/// The main struct to interact with the Constellation SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: `Clone` must return an owned reference to the same instance. Any mutable state
    // lives behind the `Arc`, ideally as part of the existing [`InternalClient`] struct.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new Constellation client that never authenticates and keeps cookies in memory.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        Self::new_with_token_handler(
            settings,
            Arc::new(InMemoryCookieStore::new()),
            Arc::new(NoopTokenHandler),
        )
    }

    /// Create a new Constellation client whose requests are authenticated by `token_handler`,
    /// with credentials persisted in `cookies`.
    pub fn new_with_token_handler(
        settings: Option<ClientSettings>,
        cookies: Arc<dyn CookieStore>,
        token_handler: Arc<dyn TokenHandler>,
    ) -> Self {
        let settings = settings.unwrap_or_default();
        let tokens = TokenStore::new();

        let http_client = new_http_client_builder(&settings)
            .build()
            .expect("HTTP Client build should not fail");

        let refresh_client = reqwest_middleware::ClientBuilder::new(http_client.clone())
            .with_arc(Arc::new(CookieInjectionMiddleware::new(cookies.clone())))
            .build();
        let refresh_config = Configuration {
            base_path: settings.base_url.clone(),
            client: refresh_client,
        };

        let context = TokenHandlerContext {
            tokens: tokens.clone(),
            cookies: cookies.clone(),
            refresh_config: refresh_config.clone(),
            refresh_timeout: settings.refresh_timeout(),
        };

        let mut api_client = reqwest_middleware::ClientBuilder::new(http_client);
        for middleware in token_handler.initialize_middleware(context) {
            api_client = api_client.with_arc(middleware);
        }
        let api_client = api_client
            .with_arc(Arc::new(CookieInjectionMiddleware::new(cookies.clone())))
            .build();

        let api_config = Configuration {
            base_path: settings.base_url.clone(),
            client: api_client,
        };

        Self {
            internal: Arc::new(InternalClient {
                settings,
                tokens,
                cookies,
                api_config,
                refresh_config,
                token_handler,
            }),
        }
    }
}

fn new_http_client_builder(settings: &ClientSettings) -> reqwest::ClientBuilder {
    #[allow(unused_mut)]
    let mut client_builder = reqwest::Client::builder()
        .user_agent(settings.user_agent.clone())
        .timeout(settings.request_timeout());

    // Enforce HTTPS for all requests in non-debug builds
    #[cfg(not(debug_assertions))]
    {
        client_builder = client_builder.https_only(true);
    }

    client_builder
}
