//! Snapshot persistence over a key-value slot.

use std::sync::Arc;

use async_trait::async_trait;
use studio_core::error::Result;
use studio_core::state::{Snapshot, SnapshotRepository, SNAPSHOT_VERSION};
use studio_core::storage::{KeyValueStore, STATE_KEY};

/// Stores the snapshot as one JSON blob in a single slot.
///
/// A corrupted or newer-than-supported blob is reported as absent so the
/// client falls back to the seed dataset instead of failing to start.
#[derive(Clone)]
pub struct KeyValueSnapshotRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueSnapshotRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, STATE_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

#[async_trait]
impl SnapshotRepository for KeyValueSnapshotRepository {
    async fn load(&self) -> Result<Option<Snapshot>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };

        let snapshot: Snapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring corrupted snapshot");
                return Ok(None);
            }
        };

        if !snapshot.is_supported() {
            tracing::warn!(
                key = %self.key,
                version = snapshot.version,
                supported = SNAPSHOT_VERSION,
                "Ignoring snapshot written by a newer client"
            );
            return Ok(None);
        }

        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.store.set(&self.key, &json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
    use studio_core::state::{Action, AppState, CollectionUpdate, reduce};
    use tempfile::TempDir;

    fn modified_snapshot() -> Snapshot {
        let state = Arc::new(AppState::seed());
        let state = reduce(&state, Action::ToggleTheme);
        let state = reduce(
            &state,
            Action::replace_collection(CollectionUpdate::Rooms(Vec::new())),
        );
        Snapshot::from_state(&state)
    }

    #[tokio::test]
    async fn test_load_missing_slot() {
        let repo = KeyValueSnapshotRepository::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let snapshot = modified_snapshot();

        KeyValueSnapshotRepository::new(Arc::new(FileKeyValueStore::new(temp_dir.path())))
            .save(&snapshot)
            .await
            .unwrap();

        let reopened =
            KeyValueSnapshotRepository::new(Arc::new(FileKeyValueStore::new(temp_dir.path())));
        let loaded = reopened.load().await.unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert!(!loaded.settings.is_dark_mode);
        assert!(loaded.rooms.is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_blob_is_absent() {
        let store = MemoryKeyValueStore::with_entries([(STATE_KEY, "{not json")]);
        let repo = KeyValueSnapshotRepository::new(Arc::new(store));
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_future_version_is_absent() {
        let mut json = serde_json::to_value(modified_snapshot()).unwrap();
        json["version"] = serde_json::json!(SNAPSHOT_VERSION + 1);
        let store = MemoryKeyValueStore::with_entries([(STATE_KEY, json.to_string())]);

        let repo = KeyValueSnapshotRepository::new(Arc::new(store));
        assert!(repo.load().await.unwrap().is_none());
    }
}
