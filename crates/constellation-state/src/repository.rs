use serde::{Serialize, de::DeserializeOwned};

/// Failure of a [Repository] operation.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    /// The backing store rejected the operation.
    #[error("Storage failure: {0}")]
    Internal(String),

    /// A stored value could not be decoded, or a new one could not be encoded.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[allow(missing_docs)]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// String-keyed storage for values of a single type.
///
/// Keys are owned strings so implementations can move them straight into a map. Removing a key
/// that does not exist succeeds.
#[async_trait::async_trait]
pub trait Repository<V: RepositoryItem>: Send + Sync {
    /// The value stored under `key`.
    async fn get(&self, key: String) -> Result<Option<V>, RepositoryError>;
    /// Every stored value, in key order.
    async fn list(&self) -> Result<Vec<V>, RepositoryError>;
    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: String, value: V) -> Result<(), RepositoryError>;
    #[allow(missing_docs)]
    async fn remove(&self, key: String) -> Result<(), RepositoryError>;
}

/// Anything a [Repository] can hold. File-backed repositories persist items as JSON.
pub trait RepositoryItem: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}

impl<T> RepositoryItem for T where T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {}
