//! Saved-credential storage
//!
//! The credential store backs the "remember me" auto-login flow. It is a
//! deliberately small abstraction over a persisted key-value pair; the
//! application shell may substitute its own secure storage.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::utils::errors::Result;

/// A remembered login id + secret pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCredentials {
    pub login_id: String,
    pub password: String,
}

/// Abstract persisted credential storage
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<SavedCredentials>>;
    async fn save(&self, credentials: &SavedCredentials) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}

/// In-memory credential store, used in tests and as a safe default
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Option<SavedCredentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<SavedCredentials>> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, credentials: &SavedCredentials) -> Result<()> {
        *self.inner.write().await = Some(credentials.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.write().await = None;
        Ok(())
    }
}

/// JSON-file credential store
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<SavedCredentials>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => {
                let credentials = serde_json::from_slice(&bytes)?;
                Ok(Some(credentials))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, credentials: &SavedCredentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(credentials)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Build a credential store from configuration: file-backed when a path
/// is configured, in-memory otherwise
pub fn credential_store_from_config(
    config: &crate::config::CredentialsConfig,
) -> Arc<dyn CredentialStore> {
    match &config.store_path {
        Some(path) => Arc::new(FileCredentialStore::new(path)),
        None => Arc::new(MemoryCredentialStore::new()),
    }
}
