//! Store state, actions and the reducer.
//!
//! # Module Structure
//!
//! - `model`: the `AppState` snapshot and partial `StatePatch`
//! - `action`: the closed action set
//! - `reducer`: the pure transition function
//! - `snapshot`: the persisted projection
//! - `repository`: persistence traits

pub mod action;
pub mod model;
pub mod reducer;
pub mod repository;
pub mod snapshot;

pub use action::{Action, CollectionName, CollectionUpdate};
pub use model::{AppState, CLIENTS_TAB, LANDING_TAB, Session, StatePatch};
pub use reducer::reduce;
pub use repository::{SnapshotRepository, TokenRepository};
pub use snapshot::{SNAPSHOT_VERSION, Snapshot};
