use serde::{Deserialize, Serialize};

use super::CookieError;

/// A cookie as kept in a [CookieStore](super::CookieStore).
///
/// Only the name and value are ever sent. The flags are stored so a persisted jar keeps the
/// policy the cookie was written with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub same_site: SameSite,
}

#[allow(missing_docs)]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl Cookie {
    /// A cookie for the refresh token or account id: `Secure`, `HttpOnly`, `SameSite=Strict`.
    pub fn credential(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
        }
    }

    /// Check that the cookie can be sent in a `Cookie` header.
    ///
    /// Names that are not tokens and values containing `;` or line breaks are
    /// [CookieError::InvalidCookie]. Weak but legal flags are only logged.
    pub fn validate_security_attributes(&self) -> Result<(), CookieError> {
        if self.name.is_empty() || self.name.contains(['=', ';', ' ']) {
            return Err(CookieError::InvalidCookie(format!(
                "name {:?} is not a valid token",
                self.name
            )));
        }
        if self.value.contains([';', '\r', '\n']) {
            return Err(CookieError::InvalidCookie(format!(
                "value of {} cannot be sent in a header",
                self.name
            )));
        }

        if !self.http_only || !self.secure || self.same_site == SameSite::None {
            tracing::warn!(
                cookie_name = %self.name,
                secure = self.secure,
                http_only = self.http_only,
                same_site = ?self.same_site,
                "Storing cookie with weak attributes"
            );
        }

        Ok(())
    }

    /// `name=value`, as it appears in a `Cookie` header.
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_cookies_are_locked_down() {
        let cookie = Cookie::credential("refresh-token", "rt1");
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(cookie.validate_security_attributes().is_ok());
    }

    #[test]
    fn header_format() {
        assert_eq!(Cookie::credential("secret", "a1").to_cookie_header(), "secret=a1");
    }

    #[test]
    fn rejects_values_that_break_the_header() {
        let cookie = Cookie::credential("secret", "a1; admin=true");
        assert!(matches!(
            cookie.validate_security_attributes(),
            Err(CookieError::InvalidCookie(_))
        ));
    }

    #[test]
    fn rejects_names_that_are_not_tokens() {
        for name in ["", "a=b", "bad name"] {
            assert!(matches!(
                Cookie::credential(name, "x").validate_security_attributes(),
                Err(CookieError::InvalidCookie(_))
            ));
        }
    }

    #[test]
    fn weak_flags_are_allowed() {
        let cookie = Cookie {
            secure: false,
            http_only: false,
            same_site: SameSite::None,
            ..Cookie::credential("theme", "dark")
        };
        assert!(cookie.validate_security_attributes().is_ok());
    }

    #[test]
    fn missing_flags_deserialize_to_defaults() {
        let cookie: Cookie = serde_json::from_str(r#"{"name":"secret","value":"a1"}"#).unwrap();
        assert!(!cookie.secure);
        assert_eq!(cookie.same_site, SameSite::Lax);
    }
}
