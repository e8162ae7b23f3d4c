//! Task model - a quantified goal with a deadline and a daily plan.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::Time;

/// A task is a quantified amount of work to finish by a due date.
///
/// The `plan` maps each calendar day between "today" (at planning time) and
/// the due date to the amount scheduled for that day. After a successful
/// planning pass the plan values sum to `max(0, total - done)`; days already
/// in the past keep whatever was planned for them until an explicit replan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Total quantity to complete (positive)
    pub total: u32,

    /// Unit label for the quantity ("page", "min", ...)
    pub unit: String,

    /// Deadline (date-only)
    pub due_date: NaiveDate,

    /// Quantity completed so far, capped at `total`
    #[serde(default)]
    pub done: u32,

    /// Per-day schedule for the remaining quantity
    #[serde(default)]
    pub plan: BTreeMap<NaiveDate, u32>,

    /// Display color tag
    #[serde(default)]
    pub color: String,

    /// Creation timestamp
    pub created_at: Time,

    /// Set when `done` first reaches `total`, cleared if progress drops back
    #[serde(default)]
    pub completed_at: Option<Time>,

    /// Soft-delete flag; deleted tasks and their logs are retained
    #[serde(default)]
    pub is_deleted: bool,
}

impl Task {
    /// Quantity planned for the given day (0 for days outside the plan).
    pub fn planned_for(&self, date: NaiveDate) -> u32 {
        self.plan.get(&date).copied().unwrap_or(0)
    }

    /// Quantity still to do.
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.done)
    }

    /// Whether the task has been fully completed.
    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

/// Partial update applied to a task by the `UpdateTask` action.
///
/// Fields left as `None` keep their current value. Carrying `total` or
/// `due_date` triggers a replan of the remaining quantity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New title
    #[serde(default)]
    pub title: Option<String>,

    /// New total quantity
    #[serde(default)]
    pub total: Option<u32>,

    /// New unit label
    #[serde(default)]
    pub unit: Option<String>,

    /// New due date
    #[serde(default)]
    pub due_date: Option<NaiveDate>,

    /// New color tag
    #[serde(default)]
    pub color: Option<String>,
}

impl TaskPatch {
    /// Whether this patch touches a field that invalidates the current plan.
    pub fn reschedules(&self) -> bool {
        self.total.is_some() || self.due_date.is_some()
    }

    /// Merge the patch into `task`, leaving absent fields untouched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(total) = self.total {
            task.total = total;
        }
        if let Some(unit) = &self.unit {
            task.unit = unit.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(color) = &self.color {
            task.color = color.clone();
        }
    }
}
