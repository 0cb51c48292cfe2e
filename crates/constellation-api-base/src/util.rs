/// Request extension marking a request as authenticated.
///
/// Only marked requests get an access token attached, and only their `UNAUTHENTICATED` responses
/// trigger a refresh and replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequired {
    /// The raw access token is sent in the `authorization` header.
    Bearer,
}

/// Content types understood by the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentType {
    /// JSON content (application/json, application/graphql-response+json).
    Json,
    /// Plain text content.
    Text,
    /// Unsupported content type.
    Unsupported(String),
}

impl From<&str> for ContentType {
    fn from(content_type: &str) -> Self {
        if content_type.starts_with("application") && content_type.contains("json") {
            Self::Json
        } else if content_type.starts_with("text/plain") {
            Self::Text
        } else {
            Self::Unsupported(content_type.to_string())
        }
    }
}

impl ContentType {
    /// Reads the content type of a response, if the header is present and readable.
    pub fn of(headers: &reqwest::header::HeaderMap) -> Option<Self> {
        headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_json_variants() {
        assert_eq!(ContentType::from("application/json"), ContentType::Json);
        assert_eq!(
            ContentType::from("application/graphql-response+json; charset=utf-8"),
            ContentType::Json
        );
        assert_eq!(ContentType::from("text/plain"), ContentType::Text);
        assert_eq!(
            ContentType::from("text/html"),
            ContentType::Unsupported("text/html".to_string())
        );
    }

    #[test]
    fn reads_header_map() {
        let mut headers = reqwest::header::HeaderMap::new();
        assert_eq!(ContentType::of(&headers), None);

        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        assert_eq!(ContentType::of(&headers), Some(ContentType::Json));
    }
}
