//! Infrastructure adapters for the studio client.
//!
//! Durable key-value slots (atomic files, in-memory), the snapshot and
//! token repositories built on them, the reqwest transport to the REST
//! backend, and configuration and path resolution.

pub mod api_client;
pub mod config_service;
pub mod paths;
pub mod snapshot_repository;
pub mod storage;
pub mod token_repository;

pub use crate::api_client::ApiClient;
pub use crate::config_service::ConfigService;
pub use crate::paths::StudioPaths;
pub use crate::snapshot_repository::KeyValueSnapshotRepository;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
pub use crate::token_repository::KeyValueTokenRepository;
