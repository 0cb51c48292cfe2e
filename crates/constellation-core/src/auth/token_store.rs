use std::sync::{Arc, RwLock};

use super::CredentialPair;

/// The shared access-token slot.
///
/// Read by the authentication middleware before every request and written by login and by the
/// refresh service. Cloning yields a handle to the same slot. The lock is never held across an
/// await point.
#[derive(Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<CredentialPair>>>,
}

impl TokenStore {
    /// Creates an empty token store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current access token, or `None` if there is none or it is empty.
    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("RwLock is not poisoned")
            .as_ref()
            .map(|pair| pair.access_token.clone())
            .filter(|token| !token.is_empty())
    }

    /// Replaces the stored pair.
    pub fn set(&self, pair: CredentialPair) {
        *self.inner.write().expect("RwLock is not poisoned") = Some(pair);
    }

    /// Forgets the stored pair.
    pub fn clear(&self) {
        *self.inner.write().expect("RwLock is not poisoned") = None;
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access_token", &self.access_token().is_some())
            .finish()
    }
}
