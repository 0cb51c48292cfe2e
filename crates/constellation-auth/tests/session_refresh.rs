//! End to end behavior of a client created with the session token handler.

use std::{sync::Arc, time::Duration};

use constellation_auth::{
    AuthClientExt, login::models::LoginRequest, token_management::SessionTokenHandler,
};
use constellation_core::{
    ApiError, Client, ClientSettings,
    auth::{RefreshError, RefreshOutcome},
    graphql::{GraphQlOperation, execute},
    http::{ACCOUNT_ID_COOKIE, Cookie, CookieStore, InMemoryCookieStore, REFRESH_TOKEN_COOKIE},
};
use serde::Deserialize;
use serde_json::json;
use wiremock::{Mock, MockServer, ResponseTemplate, matchers};

struct Me;

#[derive(Debug, Deserialize)]
struct MeData {
    name: String,
}

impl GraphQlOperation for Me {
    type Variables = serde_json::Value;
    type Data = MeData;

    const OPERATION_NAME: &'static str = "Me";
    const QUERY: &'static str = "query Me { name }";
}

async fn session_client(server: &MockServer, cookies: &[(&str, &str)]) -> Client {
    let store = Arc::new(InMemoryCookieStore::new());
    for (name, value) in cookies {
        store
            .set_cookie(Cookie::credential(*name, *value))
            .await
            .unwrap();
    }

    Client::new_with_token_handler(
        Some(ClientSettings::with_base_url(server.uri())),
        store,
        Arc::new(SessionTokenHandler::new()),
    )
}

fn unauthenticated() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": null,
        "errors": [{"message": "Unauthorized", "extensions": {"code": "UNAUTHENTICATED"}}]
    }))
}

/// One server playing both endpoints: GraphQL accepts `valid_token` only.
async fn start_server(valid_token: &str, refresh: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/refresh-token"))
        .respond_with(refresh)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/graphql"))
        .and(matchers::header("authorization", valid_token))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"name": "Ada"}})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/graphql"))
        .respond_with(unauthenticated())
        .mount(&server)
        .await;
    server
}

fn refreshed(access_token: &str, refresh_token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "accessToken": access_token,
        "refreshToken": refresh_token,
    }))
}

async fn count(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}

#[tokio::test]
async fn empty_store_refreshes_then_reuses_the_new_token() {
    let server = start_server("at2", refreshed("at2", "rt2")).await;
    let client = session_client(
        &server,
        &[(REFRESH_TOKEN_COOKIE, "rt1"), (ACCOUNT_ID_COOKIE, "a1")],
    )
    .await;
    let config = client.internal.get_api_configuration();

    let data = execute::<Me>(config, &json!({}), true).await.unwrap();
    assert_eq!(data.name, "Ada");
    assert_eq!(client.internal.tokens().access_token().as_deref(), Some("at2"));

    execute::<Me>(config, &json!({}), true).await.unwrap();

    assert_eq!(count(&server, "/api/refresh-token").await, 1);
    let requests = server.received_requests().await.unwrap();
    let graphql: Vec<_> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/graphql")
        .collect();
    assert_eq!(graphql.len(), 2);
    for request in graphql {
        assert_eq!(request.headers["authorization"], "at2");
    }
    assert_eq!(
        client
            .internal
            .cookies()
            .get_value(REFRESH_TOKEN_COOKIE)
            .await
            .unwrap()
            .as_deref(),
        Some("rt2")
    );
}

#[tokio::test]
async fn missing_refresh_token_fails_with_missing_credentials() {
    let server = start_server("at2", refreshed("at2", "rt2")).await;
    let client = session_client(&server, &[(ACCOUNT_ID_COOKIE, "a1")]).await;

    let err = execute::<Me>(client.internal.get_api_configuration(), &json!({}), true)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::MissingCredentials(_)));
    assert_eq!(err.to_string(), "missing credentials");
    assert_eq!(count(&server, "/api/refresh-token").await, 0);
    // Sent once without a token, never replayed.
    assert_eq!(count(&server, "/api/graphql").await, 1);
}

#[tokio::test]
async fn expired_token_is_replaced_and_replayed() {
    let server = start_server("at2", refreshed("at2", "rt2")).await;
    let client = session_client(
        &server,
        &[(REFRESH_TOKEN_COOKIE, "rt1"), (ACCOUNT_ID_COOKIE, "a1")],
    )
    .await;
    client
        .internal
        .tokens()
        .set(constellation_core::auth::CredentialPair::new("at1", "rt1"));

    let data = execute::<Me>(client.internal.get_api_configuration(), &json!({}), true)
        .await
        .unwrap();

    assert_eq!(data.name, "Ada");
    assert_eq!(count(&server, "/api/refresh-token").await, 1);
    assert_eq!(count(&server, "/api/graphql").await, 2);
}

#[tokio::test]
async fn refresh_failure_surfaces_as_refresh_error() {
    let server = start_server("at2", ResponseTemplate::new(401)).await;
    let client = session_client(
        &server,
        &[(REFRESH_TOKEN_COOKIE, "rt1"), (ACCOUNT_ID_COOKIE, "a1")],
    )
    .await;

    let err = execute::<Me>(client.internal.get_api_configuration(), &json!({}), true)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Refresh(RefreshError::Network {
            status: Some(401),
            ..
        })
    ));
    assert_eq!(count(&server, "/api/graphql").await, 0);
}

#[tokio::test]
async fn refresh_timeout_comes_from_settings() {
    let server = start_server(
        "at2",
        refreshed("at2", "rt2").set_delay(Duration::from_secs(3)),
    )
    .await;
    let store = Arc::new(InMemoryCookieStore::new());
    store
        .set_cookie(Cookie::credential(REFRESH_TOKEN_COOKIE, "rt1"))
        .await
        .unwrap();
    store
        .set_cookie(Cookie::credential(ACCOUNT_ID_COOKIE, "a1"))
        .await
        .unwrap();
    let client = Client::new_with_token_handler(
        Some(ClientSettings {
            refresh_timeout_secs: 1,
            ..ClientSettings::with_base_url(server.uri())
        }),
        store,
        Arc::new(SessionTokenHandler::new()),
    );

    assert_eq!(client.auth().refresh().await, Err(RefreshError::Timeout));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_requests_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/refresh-token"))
        .respond_with(refreshed("at2", "rt2").set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/graphql"))
        .and(matchers::header("authorization", "at2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"name": "Ada"}})))
        .mount(&server)
        .await;
    let client = session_client(
        &server,
        &[(REFRESH_TOKEN_COOKIE, "rt1"), (ACCOUNT_ID_COOKIE, "a1")],
    )
    .await;

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move {
                execute::<Me>(client.internal.get_api_configuration(), &json!({}), true).await
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().name, "Ada");
    }
    server.verify().await;
}

#[tokio::test]
async fn login_then_authenticated_request() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/graphql"))
        .and(matchers::body_partial_json(json!({"operationName": "Login"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"Auth": {"loginJwt": {
                "jwtTokens": {"accessToken": "at1", "refreshToken": "rt1"},
                "accountId": "a1"
            }}}
        })))
        .mount(&server)
        .await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/api/graphql"))
        .and(matchers::header("authorization", "at1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"name": "Ada"}})))
        .mount(&server)
        .await;
    let client = session_client(&server, &[]).await;

    client
        .auth()
        .login()
        .login(LoginRequest::new("example@email.com", "securePassword123"))
        .await
        .unwrap();
    let data = execute::<Me>(client.internal.get_api_configuration(), &json!({}), true)
        .await
        .unwrap();
    assert_eq!(data.name, "Ada");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[1].headers["cookie"], "refresh-token=rt1; secret=a1");

    client.auth().logout().await.unwrap();
    assert_eq!(client.auth().refresh().await, Ok(RefreshOutcome::NoCredentials));
}

#[tokio::test]
async fn clients_sharing_a_handler_keep_separate_sessions() {
    let server = start_server("at2", refreshed("at2", "rt2")).await;
    let handler = Arc::new(SessionTokenHandler::new());

    let first = Client::new_with_token_handler(
        Some(ClientSettings::with_base_url(server.uri())),
        Arc::new(InMemoryCookieStore::new()),
        handler.clone(),
    );
    let second_cookies = Arc::new(InMemoryCookieStore::new());
    second_cookies
        .set_cookie(Cookie::credential(REFRESH_TOKEN_COOKIE, "rt1"))
        .await
        .unwrap();
    second_cookies
        .set_cookie(Cookie::credential(ACCOUNT_ID_COOKIE, "a1"))
        .await
        .unwrap();
    let second = Client::new_with_token_handler(
        Some(ClientSettings::with_base_url(server.uri())),
        second_cookies,
        handler,
    );

    let data = execute::<Me>(second.internal.get_api_configuration(), &json!({}), true)
        .await
        .unwrap();
    assert_eq!(data.name, "Ada");
    assert_eq!(second.internal.tokens().access_token().as_deref(), Some("at2"));
    assert_eq!(first.internal.tokens().access_token(), None);

    let result = execute::<Me>(first.internal.get_api_configuration(), &json!({}), true).await;
    assert!(matches!(result, Err(ApiError::MissingCredentials(_))));
    assert_eq!(count(&server, "/api/refresh-token").await, 1);
}
