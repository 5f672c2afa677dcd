//! Core of the studio client state engine.
//!
//! Entity records, the immutable store state, the closed action set and the
//! pure reducer, plus the traits the outer layers implement (durable
//! storage, persistence repositories, remote transport, message delivery).
//! Nothing in this crate performs I/O.

pub mod chatbot;
pub mod config;
pub mod entity;
pub mod error;
pub mod remote;
pub mod seed;
pub mod settings;
pub mod state;
pub mod storage;

mod patch;

// Re-export common error type
pub use error::{Result, StudioError};
