//! Errors that can occur when using this SDK

use std::fmt::Debug;

use constellation_api_base::Error as BaseApiError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::{auth::RefreshError, graphql::GraphQlError};

/// Errors from performing network requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server could not be reached or the transport failed.
    #[error(transparent)]
    Transport(#[from] BaseApiError),
    /// The response body could not be decoded.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// The server answered with a non-success status and a body that is not a GraphQL response.
    #[error("Received error message from server: [{}] {}", .status, .message)]
    ResponseContent {
        /// HTTP status of the response.
        status: StatusCode,
        /// Raw response body.
        message: String,
    },

    /// A token refresh triggered on behalf of this request failed.
    #[error(transparent)]
    Refresh(#[from] RefreshError),
    /// The server rejected the access token and no refresh token or account id is stored.
    #[error(transparent)]
    MissingCredentials(#[from] MissingCredentialsError),
    /// The server rejected the access token, even after a refresh.
    #[error("Unauthenticated: {}", .0.join(", "))]
    Unauthenticated(Vec<String>),
    /// The server returned GraphQL errors that are not authentication failures.
    #[error("GraphQL error: {}", display_graphql_errors(.0))]
    GraphQl(Vec<GraphQlError>),
    /// A required field was missing from the response.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

fn display_graphql_errors(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| match e.code() {
            Some(code) => format!("[{code}] {}", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.into())
    }
}

impl From<reqwest_middleware::Error> for ApiError {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => {
                // Middleware errors are type-erased on the way out of the chain; recover the ones
                // callers are expected to branch on.
                if let Some(refresh) = e.downcast_ref::<RefreshError>() {
                    return Self::Refresh(refresh.clone());
                }
                if e.downcast_ref::<MissingCredentialsError>().is_some() {
                    return Self::MissingCredentials(MissingCredentialsError);
                }
                Self::Transport(BaseApiError::Other(e.to_string()))
            }
        }
    }
}

/// The request needed a token refresh, but no refresh token or account id is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("missing credentials")]
pub struct MissingCredentialsError;

/// Missing required field.
#[derive(Debug, Error)]
#[error("The response received was missing a required field: {0}")]
pub struct MissingFieldError(pub &'static str);

/// This macro is used to require that a value is present or return an error otherwise.
/// It is equivalent to using `val.ok_or(Error::MissingFields)?`, but easier to use and
/// with a more descriptive error message.
/// Note that this macro will return early from the function if the value is not present.
#[macro_export]
macro_rules! require {
    ($val:expr) => {
        match $val {
            Some(val) => val,
            None => return Err($crate::MissingFieldError(stringify!($val)).into()),
        }
    };
}
