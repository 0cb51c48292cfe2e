use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An access token together with the refresh token that was issued alongside it.
///
/// The pair is always replaced as a unit.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialPair {
    /// Short-lived token sent in the `authorization` header.
    pub access_token: String,
    /// Long-lived token used to mint a new access token.
    pub refresh_token: String,
}

impl CredentialPair {
    /// Creates a new credential pair.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Result of a refresh attempt that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The server issued a new credential pair, which has already been published.
    Refreshed(CredentialPair),
    /// The refresh token or the account identifier is not stored, so no refresh was attempted.
    NoCredentials,
}

impl RefreshOutcome {
    /// The new access token, if the refresh produced one.
    pub fn access_token(&self) -> Option<&str> {
        match self {
            RefreshOutcome::Refreshed(pair) => Some(&pair.access_token),
            RefreshOutcome::NoCredentials => None,
        }
    }
}

/// A refresh attempt that failed.
///
/// The error is cloneable because a single in-flight refresh may be awaited by several requests,
/// all of which observe the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The refresh endpoint was unreachable or answered with a non-success status.
    #[error("Error refreshing token: {message}")]
    Network {
        /// HTTP status, when the server answered.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },
    /// The refresh endpoint did not answer within the configured timeout.
    #[error("Token refresh timed out")]
    Timeout,
    /// The refresh endpoint answered successfully but the payload was not usable.
    #[error("Malformed token refresh response: {0}")]
    MalformedResponse(String),
    /// Reading or writing the stored credentials failed.
    #[error("Credential storage failed: {0}")]
    Storage(String),
}
