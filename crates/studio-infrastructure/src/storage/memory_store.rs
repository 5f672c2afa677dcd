//! Process-local key-value slots.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use studio_core::error::Result;
use studio_core::storage::KeyValueStore;
use tokio::sync::RwLock;

/// In-memory slots for tests and ephemeral runs. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let slots = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            slots: Arc::new(RwLock::new(slots)),
        }
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.slots.read().await.contains_key(key)
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_slots() {
        let store = MemoryKeyValueStore::with_entries([("auth_token", "tok")]);
        let clone = store.clone();

        clone.remove("auth_token").await.unwrap();
        assert!(!store.contains("auth_token").await);

        store.set("studio_state", "{}").await.unwrap();
        assert_eq!(clone.get("studio_state").await.unwrap().as_deref(), Some("{}"));
    }
}
