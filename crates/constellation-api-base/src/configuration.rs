//! Configuration types for API clients.

/// Configuration for an API client.
///
/// This struct provides all the configuration options needed for making requests to the
/// Constellation API. The `client` carries whatever middleware chain the owner installed, so two
/// configurations pointing at the same `base_path` may behave differently: the GraphQL
/// configuration authenticates and replays requests, the refresh configuration does not.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// Base URL of the API (e.g. "<https://staging.api.constellation.academy>").
    pub base_path: String,
    /// HTTP client with middleware support.
    pub client: reqwest_middleware::ClientWithMiddleware,
}

impl Configuration {
    /// Joins `path` onto the base path, tolerating a trailing slash on the base.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_path.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_path: &str) -> Configuration {
        Configuration {
            base_path: base_path.to_string(),
            client: reqwest_middleware::ClientBuilder::new(reqwest::Client::new()).build(),
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            config("https://api.example.com/").url("/api/graphql"),
            "https://api.example.com/api/graphql"
        );
        assert_eq!(
            config("https://api.example.com").url("api/refresh-token"),
            "https://api.example.com/api/refresh-token"
        );
    }
}
