//! Cookie storage and the middleware that sends stored cookies with every request.
//!
//! Cookies play the role of the browser's cookie jar: the refresh token and account identifier
//! live here between sessions.

/// Cookie data model and security validation.
pub mod cookie;
/// Cookie error types.
pub mod cookie_error;
mod cookie_middleware;
mod cookie_store;
mod in_memory_cookie_store;
mod repository_cookie_store;

pub use cookie::{Cookie, SameSite};
pub use cookie_error::CookieError;
pub use cookie_middleware::CookieInjectionMiddleware;
pub use cookie_store::CookieStore;
pub use in_memory_cookie_store::InMemoryCookieStore;
pub use repository_cookie_store::RepositoryCookieStore;

/// Cookie holding the long-lived refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";
/// Cookie holding the account identifier sent alongside the refresh token.
pub const ACCOUNT_ID_COOKIE: &str = "secret";
/// Legacy cookie holding an access token. Only ever removed.
pub const ACCESS_TOKEN_COOKIE: &str = "access-token";
