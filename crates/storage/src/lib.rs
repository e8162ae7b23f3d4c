//! Storage abstraction and implementations for Pacer.
//!
//! This crate provides a trait-based persistence interface for state
//! snapshots with a single-file JSON reference implementation. Persistence
//! is a best-effort side effect after a transition: a failed save is
//! reported to the caller and must never roll back the in-memory snapshot.

#![warn(missing_docs)]

pub mod json_storage;
pub mod trait_;

pub use json_storage::JsonStorage;
pub use trait_::{Result, Storage, StorageError};
