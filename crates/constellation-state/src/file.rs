use std::{
    collections::BTreeMap,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use tokio::sync::Mutex;
use tracing::debug;

use crate::repository::{Repository, RepositoryError, RepositoryItem};

/// Repository persisted as a single JSON object in a file.
///
/// Every write rewrites the whole file through a temporary sibling followed by a rename, so a
/// crash mid-write leaves the previous contents in place. A missing file reads as empty.
pub struct JsonFileRepository<V> {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> V>,
}

impl<V> JsonFileRepository<V> {
    /// Creates a repository backed by `path`. The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _marker: PhantomData,
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<V: RepositoryItem> JsonFileRepository<V> {
    async fn read_all(&self) -> Result<BTreeMap<String, V>, RepositoryError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(BTreeMap::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, V>) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, serde_json::to_vec_pretty(items)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), items = items.len(), "Repository file written");
        Ok(())
    }
}

#[async_trait::async_trait]
impl<V: RepositoryItem> Repository<V> for JsonFileRepository<V> {
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(&key))
    }

    async fn list(&self) -> Result<Vec<V>, RepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.into_values().collect())
    }

    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(key, value);
        self.write_all(&items).await
    }

    async fn remove(&self, key: String) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(&key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}
