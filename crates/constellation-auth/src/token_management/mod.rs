//! Token management: the refresh service and the two middleware stages built on it.
//!
//! Requests marked with [AuthRequired](constellation_api_base::AuthRequired) pass through
//! [UnauthenticatedRetryMiddleware] (outermost) and then [AuthenticationMiddleware]. Both use the
//! same [TokenRefreshService].

mod middleware;
mod refresh;
mod session_token_handler;
mod unauthenticated;

pub use middleware::AuthenticationMiddleware;
pub use refresh::{REFRESH_PATH, TokenRefreshService};
pub use session_token_handler::SessionTokenHandler;
pub use unauthenticated::UnauthenticatedRetryMiddleware;

#[cfg(test)]
mod test_utils;
