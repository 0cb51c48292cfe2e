use super::{Cookie, CookieError};

/// Where the session's cookies live between requests.
///
/// The refresh service reads the `refresh-token` and `secret` cookies from here, login and refresh
/// write them, and [CookieInjectionMiddleware](super::CookieInjectionMiddleware) sends every
/// stored cookie with each request.
#[async_trait::async_trait]
pub trait CookieStore: Send + Sync {
    /// The cookie called `name`, if there is one.
    async fn get_cookie(&self, name: &str) -> Result<Option<Cookie>, CookieError>;

    /// Store `cookie`, replacing one with the same name. Implementations reject cookies that fail
    /// [Cookie::validate_security_attributes].
    async fn set_cookie(&self, cookie: Cookie) -> Result<(), CookieError>;

    /// Forget the cookie called `name`. Succeeds when there is none.
    async fn remove_cookie(&self, name: &str) -> Result<(), CookieError>;

    /// All stored cookies.
    async fn list_cookies(&self) -> Result<Vec<Cookie>, CookieError>;

    /// The value of the cookie called `name`. Empty values read as `None`.
    async fn get_value(&self, name: &str) -> Result<Option<String>, CookieError> {
        Ok(self
            .get_cookie(name)
            .await?
            .map(|c| c.value)
            .filter(|v| !v.is_empty()))
    }
}
