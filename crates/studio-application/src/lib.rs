//! Application layer for the studio client.
//!
//! Wires the pure store core to its effects: the dispatching [`Store`], the
//! remote sync batch, the bootstrap/lifecycle state machine, theme
//! mirroring, and chatbot notifications.

pub mod lifecycle;
pub mod notification;
pub mod store;
pub mod sync;
pub mod theme;

pub use lifecycle::{LifecycleController, LifecycleHandle, LifecyclePhase};
pub use notification::{ChatbotService, LogMessageSender};
pub use store::Store;
pub use sync::{RemoteSyncService, SyncReport};
pub use theme::{ThemeFlag, ThemeSink};
