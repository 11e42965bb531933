//! Credential store trait.

use async_trait::async_trait;

use crate::Result;
use crate::credential::Credential;

/// Persistent storage for the single session credential.
///
/// The store is injected into the gateway rather than accessed as a
/// module-level singleton, so tests and embedders can substitute an
/// in-memory implementation.
///
/// Implementations must tolerate repeated `clear` calls: clearing an
/// already-empty store succeeds.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential, if any.
    async fn load(&self) -> Result<Option<Credential>>;

    /// Persist a credential, replacing any existing one.
    async fn save(&self, credential: &Credential) -> Result<()>;

    /// Remove the stored credential and all associated display fields.
    async fn clear(&self) -> Result<()>;
}
