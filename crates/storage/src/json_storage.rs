//! JSON file storage implementation.
//!
//! Stores the entire snapshot as one pretty-printed JSON file. Missing
//! fields in an existing file deserialize to their documented defaults, so
//! snapshots written by older builds keep loading.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pacer_core::AppState;
use tokio::fs;
use tracing::warn;

use super::{Result, Storage};

/// File-based JSON storage backend.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Create storage writing to `path`. Parent directories are created
    /// up front; the file itself appears on first save.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        Ok(Self { path })
    }

    /// Load the snapshot, falling back to the default one (empty
    /// collections, gentle mode) when the file is absent or unreadable.
    /// Failures are logged at the boundary, never propagated.
    pub async fn load_or_default(&self) -> AppState {
        match self.load().await {
            Ok(Some(state)) => state,
            Ok(None) => AppState::default(),
            Err(error) => {
                warn!(%error, path = %self.path.display(), "snapshot load failed, starting fresh");
                AppState::default()
            }
        }
    }
}

#[async_trait]
impl Storage for JsonStorage {
    async fn load(&self) -> Result<Option<AppState>> {
        match fs::read_to_string(&self.path).await {
            Ok(json) => {
                let state = serde_json::from_str(&json)?;
                Ok(Some(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&mut self, state: &AppState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json.as_bytes()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pacer_core::{Mode, Task, TaskId};
    use std::collections::BTreeMap;

    fn sample_state() -> AppState {
        let due = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let mut plan = BTreeMap::new();
        plan.insert(due, 30u32);
        let mut state = AppState::default();
        state.settings.mode = Mode::Strict;
        state.tasks.push(Task {
            id: TaskId::new(),
            title: "Read textbook".to_string(),
            total: 30,
            unit: "page".to_string(),
            due_date: due,
            done: 0,
            plan,
            color: "#FF6B6B".to_string(),
            created_at: chrono::Utc::now(),
            completed_at: None,
            is_deleted: false,
        });
        state.activity_log.insert(due);
        state
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("pacer.json")).await.unwrap();

        let state = sample_state();
        storage.save(&state).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded.tasks.len(), 1);
        assert_eq!(loaded.tasks[0].id, state.tasks[0].id);
        assert_eq!(loaded.tasks[0].plan, state.tasks[0].plan);
        assert_eq!(loaded.settings.mode, Mode::Strict);
        assert_eq!(loaded.streak_days(), 1);
    }

    #[tokio::test]
    async fn absent_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("pacer.json")).await.unwrap();

        assert!(storage.load().await.unwrap().is_none());
        let state = storage.load_or_default().await;
        assert!(state.tasks.is_empty());
        assert_eq!(state.settings.mode, Mode::Gentle);
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pacer.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let storage = JsonStorage::new(&path).await.unwrap();
        assert!(storage.load().await.is_err());

        let state = storage.load_or_default().await;
        assert!(state.tasks.is_empty());
        assert_eq!(state.settings.mode, Mode::Gentle);
    }

    #[tokio::test]
    async fn partial_snapshot_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pacer.json");
        tokio::fs::write(&path, br#"{"settings":{"mode":"strict"}}"#)
            .await
            .unwrap();

        let storage = JsonStorage::new(&path).await.unwrap();
        let state = storage.load().await.unwrap().unwrap();
        assert_eq!(state.settings.mode, Mode::Strict);
        assert!(state.tasks.is_empty());
        assert!(state.logs.is_empty());
    }
}
