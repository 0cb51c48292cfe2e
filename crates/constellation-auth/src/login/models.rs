use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::LoginError;

/// Message shown when the e-mail address is not well formed.
pub const INVALID_EMAIL_MESSAGE: &str = "Your E-Mail Format is incorrect";
/// Message shown when no password was entered.
pub const MISSING_PASSWORD_MESSAGE: &str = "Enter your Password";

/// Credentials entered by the user.
#[derive(Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    /// E-mail address of the account.
    #[validate(email(message = "Your E-Mail Format is incorrect"))]
    pub email: String,
    /// Plain text password. Sent to the server over TLS only.
    #[validate(length(min = 1, message = "Enter your Password"))]
    pub password: String,
}

impl LoginRequest {
    #[allow(missing_docs)]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the request before anything is sent. The e-mail is reported before the password.
    pub fn validate_input(&self) -> Result<(), LoginError> {
        let Err(errors) = self.validate() else {
            return Ok(());
        };

        let field_errors = errors.field_errors();
        let message = ["email", "password"]
            .into_iter()
            .filter_map(|field| field_errors.get(field))
            .flat_map(|errors| errors.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());

        Err(LoginError::Validation(message))
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Identifier of the account that logged in. Stored as the `secret` cookie.
    pub account_id: String,
}
