//! Pacer core data models.
//!
//! This crate defines the data structures shared by the planner, the
//! reducer and the persistence layer: tasks, progress ledger entries,
//! pacing modes and the state snapshot.

#![warn(missing_docs)]

// Core identities
mod id;

// Task and progress ledger
mod ledger;
mod task;

// Pacing configuration and snapshot
mod mode;
mod state;

// Re-exports
pub use id::*;

pub use ledger::ProgressEntry;
pub use task::{Task, TaskPatch};

pub use mode::{Mode, ModeConfig};
pub use state::{AppState, Settings};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
