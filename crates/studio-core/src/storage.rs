//! Durable storage boundary.

use async_trait::async_trait;

use crate::error::Result;

/// Slot key of the persisted store snapshot.
pub const STATE_KEY: &str = "studio_state";
/// Slot key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// String-keyed slots holding one string each.
///
/// Every `set` replaces the slot as a whole; readers never observe a
/// partially written value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the slot. Removing a missing slot is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
