use std::sync::Arc;

use http::HeaderValue;

use super::CookieStore;

/// Sends every live cookie in the store as one `Cookie` header, the way a browser does for a
/// request made with credentials included.
///
/// A store that cannot be read, or cookies that do not form a valid header, leave the request
/// untouched.
pub struct CookieInjectionMiddleware {
    cookie_store: Arc<dyn CookieStore>,
}

impl CookieInjectionMiddleware {
    #[allow(missing_docs)]
    pub fn new(cookie_store: Arc<dyn CookieStore>) -> Self {
        Self { cookie_store }
    }

    async fn header(&self) -> Option<HeaderValue> {
        let cookies = self
            .cookie_store
            .list_cookies()
            .await
            .inspect_err(|e| tracing::warn!("Failed to read cookies: {e}"))
            .ok()?;
        if cookies.is_empty() {
            return None;
        }

        // Sorted so the header does not depend on the store's iteration order
        let mut pairs: Vec<String> = cookies.iter().map(|c| c.to_cookie_header()).collect();
        pairs.sort();

        HeaderValue::from_str(&pairs.join("; "))
            .inspect_err(|e| tracing::warn!("Cookies do not form a valid header: {e}"))
            .ok()
    }
}

#[async_trait::async_trait]
impl reqwest_middleware::Middleware for CookieInjectionMiddleware {
    async fn handle(
        &self,
        mut req: reqwest::Request,
        extensions: &mut http::Extensions,
        next: reqwest_middleware::Next<'_>,
    ) -> Result<reqwest::Response, reqwest_middleware::Error> {
        if let Some(value) = self.header().await {
            req.headers_mut().insert(http::header::COOKIE, value);
        }
        next.run(req, extensions).await
    }
}
