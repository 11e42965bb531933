//! In-memory credential store.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::Result;
use crate::credential::Credential;
use crate::traits::CredentialStore;

/// A credential store backed by process memory.
///
/// Used as the substitutable fake in gateway tests and by embedders that
/// manage persistence themselves. Not persisted across restarts.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: RwLock::new(Some(credential)),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>> {
        Ok(self.slot.read().expect("store lock poisoned").clone())
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        *self.slot.write().expect("store lock poisoned") = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot.write().expect("store lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_empty() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = MemoryCredentialStore::new();
        let credential = Credential::new("abc123", "Jane", "Doe", None);
        store.save(&credential).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.token.as_str(), "abc123");
        assert_eq!(loaded.fname, "Jane");
    }

    #[tokio::test]
    async fn clear_removes_credential() {
        let store =
            MemoryCredentialStore::with_credential(Credential::new("abc123", "Jane", "Doe", None));
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_on_empty_store_succeeds() {
        let store = MemoryCredentialStore::new();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }
}
