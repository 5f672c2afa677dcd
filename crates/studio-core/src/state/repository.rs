//! Persistence repository traits.

use async_trait::async_trait;

use crate::error::Result;
use crate::state::snapshot::Snapshot;

/// Repository for the persisted store snapshot.
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Loads the last saved snapshot.
    ///
    /// A missing, corrupted or unsupported slot yields `Ok(None)`.
    async fn load(&self) -> Result<Option<Snapshot>>;

    /// Saves the snapshot, replacing the previous one as a whole.
    async fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Repository for the bearer token of the signed-in user.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn get_token(&self) -> Result<Option<String>>;

    async fn set_token(&self, token: &str) -> Result<()>;

    async fn clear_token(&self) -> Result<()>;
}
