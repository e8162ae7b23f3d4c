//! Storage trait abstraction.

use async_trait::async_trait;
use pacer_core::AppState;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage abstraction for Pacer snapshots.
///
/// This trait allows different storage backends to be plugged in. The unit
/// of persistence is the whole snapshot; there is no partial write.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Load the persisted snapshot; `None` when nothing was saved yet.
    async fn load(&self) -> Result<Option<AppState>>;

    /// Persist a snapshot, replacing whatever was stored before.
    async fn save(&mut self, state: &AppState) -> Result<()>;
}
