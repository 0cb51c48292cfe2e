use constellation_api_base::{AuthRequired, Configuration, ContentType};
use tracing::debug;

use super::{GraphQlOperation, GraphQlRequest, GraphQlResponse};
use crate::{ApiError, MissingFieldError};

/// Path of the GraphQL endpoint, relative to the configured base path.
pub const GRAPHQL_PATH: &str = "api/graphql";

/// Executes operation `O` against `{base}/api/graphql`.
///
/// When `authenticated` is set the request is marked with [AuthRequired], which makes the
/// token middleware attach the access token and replay the request once after a refresh if the
/// server rejects the token. Any GraphQL error fails the whole operation, even when partial data
/// was returned.
pub async fn execute<O: GraphQlOperation>(
    config: &Configuration,
    variables: &O::Variables,
    authenticated: bool,
) -> Result<O::Data, ApiError> {
    let mut request = config
        .client
        .post(config.url(GRAPHQL_PATH))
        .header(reqwest::header::ACCEPT, "application/json")
        .json(&GraphQlRequest::new::<O>(variables));

    if authenticated {
        request = request.with_extension(AuthRequired::Bearer);
    }

    debug!(operation = O::OPERATION_NAME, "Executing GraphQL operation");
    let response = request.send().await?;

    let status = response.status();
    let is_json = ContentType::of(response.headers()) == Some(ContentType::Json);
    let text = response.text().await?;

    let envelope: GraphQlResponse<O::Data> = match serde_json::from_str(&text) {
        Ok(envelope) => envelope,
        Err(_) if !status.is_success() || !is_json => {
            return Err(ApiError::ResponseContent {
                status,
                message: text,
            });
        }
        Err(e) => return Err(e.into()),
    };

    if !envelope.errors.is_empty() {
        debug!(
            operation = O::OPERATION_NAME,
            count = envelope.errors.len(),
            "GraphQL operation returned errors"
        );

        if envelope.errors.iter().any(|e| e.is_unauthenticated()) {
            return Err(ApiError::Unauthenticated(
                envelope.errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        return Err(ApiError::GraphQl(envelope.errors));
    }

    Ok(envelope.data.ok_or(MissingFieldError("data"))?)
}
