use std::sync::Arc;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::Key;
use crate::repository::{Repository, RepositoryError};

/// The untyped form in which settings are stored. Go through [Setting] instead.
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingItem(pub(crate) serde_json::Value);

/// Typed access to the value stored under one [Key].
pub struct Setting<T> {
    repository: Arc<dyn Repository<SettingItem>>,
    key: Key<T>,
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            key: self.key,
        }
    }
}

impl<T> Setting<T> {
    #[allow(missing_docs)]
    pub fn new(repository: Arc<dyn Repository<SettingItem>>, key: Key<T>) -> Self {
        Self { repository, key }
    }

    #[allow(missing_docs)]
    pub fn key(&self) -> Key<T> {
        self.key
    }

    /// Remove the stored value. Deleting an unset setting is not an error.
    pub async fn delete(&self) -> Result<(), SettingsError> {
        self.repository.remove(self.storage_key()).await?;
        Ok(())
    }

    fn storage_key(&self) -> String {
        self.key.name().to_owned()
    }
}

impl<T: Serialize + DeserializeOwned> Setting<T> {
    /// The stored value, or `None` when it was never set.
    ///
    /// A value written under the same name with a different type fails with
    /// [SettingsError::Json].
    pub async fn get(&self) -> Result<Option<T>, SettingsError> {
        let Some(SettingItem(value)) = self.repository.get(self.storage_key()).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(value)?))
    }

    /// Store `value`, replacing any previous one.
    pub async fn update(&self, value: T) -> Result<(), SettingsError> {
        let item = SettingItem(serde_json::to_value(&value)?);
        self.repository.set(self.storage_key(), item).await?;
        Ok(())
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Setting has an unexpected shape: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
