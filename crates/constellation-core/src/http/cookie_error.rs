use constellation_state::RepositoryError;

#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    /// Reading or writing the backing store failed.
    #[error("Cookie storage failed: {0}")]
    StorageFailure(String),

    /// The name or value cannot be sent in a `Cookie` header.
    #[error("Invalid cookie: {0}")]
    InvalidCookie(String),
}

impl From<RepositoryError> for CookieError {
    fn from(e: RepositoryError) -> Self {
        CookieError::StorageFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_errors_become_storage_failures() {
        let err = CookieError::from(RepositoryError::Internal("locked".to_string()));
        assert_eq!(err.to_string(), "Cookie storage failed: Storage failure: locked");
    }
}
