//! Bearer token persistence over a key-value slot.

use std::sync::Arc;

use async_trait::async_trait;
use studio_core::error::Result;
use studio_core::state::TokenRepository;
use studio_core::storage::{KeyValueStore, TOKEN_KEY};

#[derive(Clone)]
pub struct KeyValueTokenRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueTokenRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TokenRepository for KeyValueTokenRepository {
    async fn get_token(&self) -> Result<Option<String>> {
        // An empty slot counts as signed out.
        Ok(self
            .store
            .get(TOKEN_KEY)
            .await?
            .filter(|token| !token.is_empty()))
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await
    }

    async fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY).await
    }
}
