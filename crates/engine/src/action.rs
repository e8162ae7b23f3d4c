//! Tagged actions accepted by the reducer.

use chrono::NaiveDate;
use pacer_core::{Mode, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};

/// One state transition request.
///
/// Each variant carries exactly the payload its transition needs. On the
/// wire the enum is adjacently tagged (`type` / `payload`) with
/// SCREAMING_SNAKE_CASE names, so a dispatcher speaks the same shape as the
/// action records it always has. Tags this build does not recognize
/// deserialize to [`Action::Unknown`], which the reducer treats as a
/// fail-soft no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Create a new task and compute its initial plan.
    AddTask {
        /// Task title
        title: String,
        /// Total quantity to complete (must be positive)
        total: u32,
        /// Unit label
        unit: String,
        /// Deadline
        due_date: NaiveDate,
        /// Display color tag
        #[serde(default)]
        color: String,
    },

    /// Merge field updates into an existing task, replanning when the
    /// patch carries `total` or `due_date`.
    UpdateTask {
        /// Target task
        id: TaskId,
        /// Fields to change
        patch: TaskPatch,
    },

    /// Soft-delete a task; it and its ledger entries are retained.
    DeleteTask {
        /// Target task
        id: TaskId,
    },

    /// Recompute a task's plan from today forward, unconditionally.
    ReplanTask {
        /// Target task
        id: TaskId,
    },

    /// Record completed work for a task on a day.
    UpdateProgress {
        /// Target task
        id: TaskId,
        /// Day the work is credited to
        date: NaiveDate,
        /// Requested amount (capped so `done` never exceeds `total`)
        amount: u32,
    },

    /// Remove the most recently recorded entry for a task/day pair.
    UndoProgress {
        /// Target task
        id: TaskId,
        /// Day whose latest entry should be removed
        date: NaiveDate,
    },

    /// Switch the pacing mode and replan every non-deleted task.
    ChangeMode {
        /// Mode to activate
        mode: Mode,
    },

    /// Unrecognized action tag; always a no-op.
    #[serde(other)]
    Unknown,
}
