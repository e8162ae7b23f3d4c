//! Progress ledger entries - atoms of the completion history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::{EntryId, TaskId};
use crate::Time;

/// One immutable record of work completed for a task on a date.
///
/// Entries are append-only: they are never edited after creation and are
/// removed only by an explicit undo, which always targets the most recently
/// appended entry for a task/date pair (insertion order, not timestamp
/// order - the two are not guaranteed to coincide when entries share a
/// timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Task this entry belongs to
    pub task_id: TaskId,

    /// Day the work is credited to (date-only)
    pub date: NaiveDate,

    /// Effective amount recorded (positive, already capped by the ledger)
    pub amount: u32,

    /// When the entry was recorded
    pub recorded_at: Time,
}
