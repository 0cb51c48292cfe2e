use std::{sync::Arc, time::Duration};

use constellation_api_base::{AuthRequired, Configuration};
use constellation_core::{
    auth::{TokenHandlerContext, TokenStore},
    http::{ACCOUNT_ID_COOKIE, Cookie, CookieStore, InMemoryCookieStore, REFRESH_TOKEN_COOKIE},
};
use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

pub fn plain_config(server_uri: &str) -> Configuration {
    Configuration {
        base_path: server_uri.to_string(),
        client: reqwest::Client::new().into(),
    }
}

/// A token handler context with the given cookies stored and an empty token store.
pub async fn context(
    server_uri: &str,
    refresh_token: Option<&str>,
    account_id: Option<&str>,
) -> TokenHandlerContext {
    let cookies = Arc::new(InMemoryCookieStore::new());
    if let Some(refresh_token) = refresh_token {
        cookies
            .set_cookie(Cookie::credential(REFRESH_TOKEN_COOKIE, refresh_token))
            .await
            .unwrap();
    }
    if let Some(account_id) = account_id {
        cookies
            .set_cookie(Cookie::credential(ACCOUNT_ID_COOKIE, account_id))
            .await
            .unwrap();
    }

    TokenHandlerContext {
        tokens: TokenStore::new(),
        cookies,
        refresh_config: plain_config(server_uri),
        refresh_timeout: Duration::from_secs(5),
    }
}

/// Start a mock server that accepts any request with a 200 response.
pub async fn start_app_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    server
}

/// Start a mock server that answers POST /api/refresh-token with the given pair.
pub async fn start_refresh_server(access_token: &str, refresh_token: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": access_token,
            "refreshToken": refresh_token,
        })))
        .mount(&server)
        .await;
    server
}

/// A GraphQL body reporting an expired session.
pub fn unauthenticated_body() -> serde_json::Value {
    json!({
        "data": null,
        "errors": [{
            "message": "Unauthorized",
            "extensions": {"code": "UNAUTHENTICATED"}
        }]
    })
}

pub fn build_client(
    middleware: Vec<Arc<dyn reqwest_middleware::Middleware>>,
) -> reqwest_middleware::ClientWithMiddleware {
    middleware
        .into_iter()
        .fold(
            reqwest_middleware::ClientBuilder::new(reqwest::Client::new()),
            |builder, middleware| builder.with_arc(middleware),
        )
        .build()
}

/// Send an authenticated request to the app server and return the Authorization header values
/// that reached the server, in order.
pub async fn send_auth_request(
    client: &reqwest_middleware::ClientWithMiddleware,
    app_server: &MockServer,
) -> Vec<Option<String>> {
    client
        .post(format!("{}/api/graphql", app_server.uri()))
        .with_extension(AuthRequired::Bearer)
        .json(&json!({"query": "{ ping }"}))
        .send()
        .await
        .unwrap();

    authorization_headers(app_server).await
}

pub async fn authorization_headers(server: &MockServer) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            r.headers
                .get("Authorization")
                .map(|v| v.to_str().unwrap().to_string())
        })
        .collect()
}
