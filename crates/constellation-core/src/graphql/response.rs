use serde::Deserialize;

/// Error code the server uses when the presented access token is missing, invalid or expired.
pub const UNAUTHENTICATED_CODE: &str = "UNAUTHENTICATED";

/// Response envelope of a GraphQL-over-HTTP request.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Result of the operation, absent when execution failed entirely.
    pub data: Option<T>,
    /// Errors raised while executing the operation.
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

/// A single entry of the `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    /// Human readable description.
    pub message: String,
    /// Path of the field that failed, if any.
    #[serde(default)]
    pub path: Option<Vec<serde_json::Value>>,
    /// Server-defined extensions, including the error code.
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

/// The `extensions` member of a GraphQL error.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlErrorExtensions {
    /// Machine readable error code.
    #[serde(default)]
    pub code: Option<String>,
}

impl GraphQlError {
    /// The error code from the extensions, if any.
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }

    /// Whether this error signals a rejected access token.
    pub fn is_unauthenticated(&self) -> bool {
        self.code() == Some(UNAUTHENTICATED_CODE)
    }
}

/// Only the part of the envelope needed to classify a response.
#[derive(Deserialize)]
struct ErrorsOnly {
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

/// Returns true if `body` is a GraphQL response whose `errors` contain at least one
/// [UNAUTHENTICATED_CODE] entry. Bodies that are not JSON, or not shaped like a GraphQL
/// response, are never unauthenticated.
pub fn has_unauthenticated_error(body: &[u8]) -> bool {
    serde_json::from_slice::<ErrorsOnly>(body)
        .ok()
        .and_then(|envelope| envelope.errors)
        .is_some_and(|errors| errors.iter().any(GraphQlError::is_unauthenticated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_unauthenticated_among_other_errors() {
        let body = br#"{
            "data": null,
            "errors": [
                {"message": "Forbidden", "extensions": {"code": "FORBIDDEN"}},
                {"message": "Token expired", "extensions": {"code": "UNAUTHENTICATED"}}
            ]
        }"#;
        assert!(has_unauthenticated_error(body));
    }

    #[test]
    fn other_codes_are_not_unauthenticated() {
        let body = br#"{"errors": [{"message": "boom", "extensions": {"code": "INTERNAL_SERVER_ERROR"}}]}"#;
        assert!(!has_unauthenticated_error(body));
    }

    #[test]
    fn errors_without_extensions_are_not_unauthenticated() {
        assert!(!has_unauthenticated_error(br#"{"errors": [{"message": "boom"}]}"#));
    }

    #[test]
    fn non_graphql_bodies_are_not_unauthenticated() {
        assert!(!has_unauthenticated_error(b"<html>502</html>"));
        assert!(!has_unauthenticated_error(br#"{"data": {"ok": true}}"#));
        assert!(!has_unauthenticated_error(b"[1, 2, 3]"));
        assert!(!has_unauthenticated_error(b""));
    }

    #[test]
    fn decodes_data_and_errors() {
        let response: GraphQlResponse<serde_json::Value> = serde_json::from_str(
            r#"{"data": {"a": 1}, "errors": [{"message": "partial", "path": ["a", 0]}]}"#,
        )
        .unwrap();

        assert_eq!(response.data, Some(serde_json::json!({"a": 1})));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].code(), None);
        assert_eq!(
            response.errors[0].path,
            Some(vec![serde_json::json!("a"), serde_json::json!(0)])
        );
    }
}
