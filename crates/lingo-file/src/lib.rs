//! lingo-file - File-backed credential store.
//!
//! Persists the single session credential as a JSON file in the platform
//! data directory, one record per installation. Absence of the file means
//! "logged out".

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::debug;

use lingo_core::error::{Error, StoreError};
use lingo_core::{Credential, CredentialStore, Result};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A credential store backed by a JSON file.
///
/// Reads and writes are not locked across processes; the expected usage is
/// a single client per installation, matching the original application.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store at the platform's per-user data directory.
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "lingo").ok_or_else(|| {
            Error::Store(StoreError::Io {
                message: "could not determine data directory".to_string(),
            })
        })?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).map_err(io_error)?;

        Ok(Self {
            path: data_dir.join("credential.json"),
        })
    }

    /// Create a store at an explicit path. Used by tests and embedders
    /// that manage their own data directory.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path).map_err(io_error)?;
        let credential = serde_json::from_str(&json).map_err(|e| {
            Error::Store(StoreError::Corrupt {
                message: e.to_string(),
            })
        })?;

        Ok(Some(credential))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let json = serde_json::to_string_pretty(credential).map_err(|e| {
            Error::Store(StoreError::Io {
                message: e.to_string(),
            })
        })?;

        fs::write(&self.path, &json).map_err(io_error)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path).map_err(io_error)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(io_error)?;
        }

        debug!(path = %self.path.display(), "credential persisted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(io_error)?;
            debug!(path = %self.path.display(), "credential cleared");
        }
        Ok(())
    }
}

fn io_error(err: std::io::Error) -> Error {
    Error::Store(StoreError::Io {
        message: err.to_string(),
    })
}
