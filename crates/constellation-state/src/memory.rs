use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::repository::{Repository, RepositoryError, RepositoryItem};

/// Repository that keeps its items in a `HashMap`.
///
/// Nothing survives the process. Suitable for tests and for clients that must not touch disk.
pub struct InMemoryRepository<V> {
    items: RwLock<HashMap<String, V>>,
}

impl<V> InMemoryRepository<V> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(HashMap::new()),
        }
    }
}

impl<V> Default for InMemoryRepository<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<V: RepositoryItem> Repository<V> for InMemoryRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        Ok(self.items.read().await.get(&key).cloned())
    }

    async fn list(&self) -> Result<Vec<V>, RepositoryError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        self.items.write().await.insert(key, value);
        Ok(())
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        self.items.write().await.remove(&key);
        Ok(())
    }
}
