/// A request that did not produce a usable HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// reqwest rejected the response status.
    #[error("API error {status}: {content}")]
    Response {
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
        /// Raw response body content.
        content: String,
    },

    /// The request never reached the server or timed out.
    #[error("not connected: {0}")]
    NotConnected(String),

    #[allow(missing_docs)]
    #[error("other error: {0}")]
    Other(String),
}

impl Error {
    /// The status the server answered with, if it answered.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return Error::Response {
                status,
                // reqwest::Error does not carry the body
                content: String::new(),
            };
        }

        if e.is_connect() || e.is_timeout() || e.is_request() {
            return Error::NotConnected(e.to_string());
        }

        Error::Other(e.to_string())
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => Error::Other(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_error_exposes_status() {
        let err = Error::Response {
            status: reqwest::StatusCode::BAD_GATEWAY,
            content: "upstream".to_string(),
        };
        assert_eq!(err.status(), Some(reqwest::StatusCode::BAD_GATEWAY));
        assert_eq!(err.to_string(), "API error 502 Bad Gateway: upstream");
    }

    #[tokio::test]
    async fn unreachable_server_is_not_connected() {
        // Port 9 (discard) on localhost is not expected to accept HTTP connections.
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .expect_err("request should fail");

        assert!(matches!(Error::from(err), Error::NotConnected(_)));
    }

    #[test]
    fn serde_errors_are_other() {
        let err = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert!(matches!(Error::from(err), Error::Other(_)));
    }
}
