use std::sync::Arc;

use constellation_state::Repository;

use super::{Cookie, CookieError, CookieStore};

/// Cookie storage backed by a [Repository], typically a
/// [JsonFileRepository](constellation_state::JsonFileRepository) so cookies survive restarts.
pub struct RepositoryCookieStore {
    repository: Arc<dyn Repository<Cookie>>,
}

impl RepositoryCookieStore {
    /// Creates a cookie store on top of `repository`.
    pub fn new(repository: Arc<dyn Repository<Cookie>>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CookieStore for RepositoryCookieStore {
    async fn get_cookie(&self, name: &str) -> Result<Option<Cookie>, CookieError> {
        Ok(self.repository.get(name.to_string()).await?)
    }

    async fn set_cookie(&self, cookie: Cookie) -> Result<(), CookieError> {
        cookie.validate_security_attributes()?;
        self.repository.set(cookie.name.clone(), cookie).await?;
        Ok(())
    }

    async fn remove_cookie(&self, name: &str) -> Result<(), CookieError> {
        self.repository.remove(name.to_string()).await?;
        Ok(())
    }

    async fn list_cookies(&self) -> Result<Vec<Cookie>, CookieError> {
        Ok(self.repository.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use constellation_state::InMemoryRepository;

    use super::*;

    fn store() -> (RepositoryCookieStore, Arc<InMemoryRepository<Cookie>>) {
        let repository = Arc::new(InMemoryRepository::<Cookie>::new());
        (RepositoryCookieStore::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn stores_cookies_in_the_repository() {
        let (store, repository) = store();
        store
            .set_cookie(Cookie::credential("secret", "a1"))
            .await
            .unwrap();

        let raw = repository.get("secret".to_string()).await.unwrap();
        assert_eq!(raw.map(|c| c.value), Some("a1".to_string()));
        assert_eq!(store.get_value("secret").await.unwrap(), Some("a1".to_string()));
    }

    #[tokio::test]
    async fn invalid_cookies_never_reach_the_repository() {
        let (store, repository) = store();

        let result = store.set_cookie(Cookie::credential("secret", "a1\r\nX: y")).await;

        assert!(matches!(result, Err(CookieError::InvalidCookie(_))));
        assert!(repository.list().await.unwrap().is_empty());
    }
}
