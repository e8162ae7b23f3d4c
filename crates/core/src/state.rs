//! The state snapshot the reducer transforms and the storage layer persists.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::ledger::ProgressEntry;
use crate::mode::Mode;
use crate::task::Task;

/// User-level settings carried in the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Active pacing mode
    #[serde(default)]
    pub mode: Mode,
}

/// One immutable snapshot of everything Pacer tracks.
///
/// Every field defaults when absent from a persisted snapshot, so partial
/// or older files load instead of failing. Transitions never mutate a
/// snapshot in place; the reducer clones and returns a new one, so readers
/// holding an old snapshot are never surprised.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    /// All tasks, soft-deleted ones included
    #[serde(default)]
    pub tasks: Vec<Task>,

    /// Append-only progress ledger, in insertion order
    #[serde(default)]
    pub logs: Vec<ProgressEntry>,

    /// Every date on which any progress was ever recorded (never shrinks)
    #[serde(default)]
    pub activity_log: BTreeSet<NaiveDate>,

    /// User settings
    #[serde(default)]
    pub settings: Settings,
}

impl AppState {
    /// Look up a task by id.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Position of a task in the task list.
    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Total amount recorded for a task on one day, summed over the ledger.
    pub fn done_on(&self, task_id: TaskId, date: NaiveDate) -> u32 {
        self.logs
            .iter()
            .filter(|entry| entry.task_id == task_id && entry.date == date)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Number of distinct days with any recorded activity (streak display).
    pub fn streak_days(&self) -> usize {
        self.activity_log.len()
    }
}
