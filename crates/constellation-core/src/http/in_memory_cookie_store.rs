use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{Cookie, CookieError, CookieStore};

/// Cookies kept only for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryCookieStore {
    cookies: RwLock<HashMap<String, Cookie>>,
}

impl InMemoryCookieStore {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CookieStore for InMemoryCookieStore {
    async fn get_cookie(&self, name: &str) -> Result<Option<Cookie>, CookieError> {
        Ok(self.cookies.read().await.get(name).cloned())
    }

    async fn set_cookie(&self, cookie: Cookie) -> Result<(), CookieError> {
        cookie.validate_security_attributes()?;
        self.cookies
            .write()
            .await
            .insert(cookie.name.clone(), cookie);
        Ok(())
    }

    async fn remove_cookie(&self, name: &str) -> Result<(), CookieError> {
        self.cookies.write().await.remove(name);
        Ok(())
    }

    async fn list_cookies(&self) -> Result<Vec<Cookie>, CookieError> {
        Ok(self.cookies.read().await.values().cloned().collect())
    }
}
