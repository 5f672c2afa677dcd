//! File-backed key-value slots.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use studio_core::error::{Result, StudioError};
use studio_core::storage::KeyValueStore;

use super::atomic_file::AtomicFile;

/// One file per key under `root`.
///
/// File I/O runs on the blocking pool so callers on the async runtime never
/// stall on disk.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot(&self, key: &str) -> Result<AtomicFile> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StudioError::storage(format!("Invalid slot key: {:?}", key)));
        }
        Ok(AtomicFile::new(self.root.join(key)))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StudioError::internal(format!("Failed to join task: {}", e)))?
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let slot = self.slot(key)?;
        run_blocking(move || slot.load()).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let slot = self.slot(key)?;
        let bytes = value.len();
        let value = value.to_string();
        run_blocking(move || slot.save(&value)).await?;
        tracing::debug!(key, bytes, "slot written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let slot = self.slot(key)?;
        run_blocking(move || slot.remove()).await
    }
}
