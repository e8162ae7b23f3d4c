//! Ledger operations: recording and undoing progress.

use chrono::NaiveDate;
use pacer_core::{AppState, EntryId, Mode, ProgressEntry, TaskId};
use pacer_plan::{allocate, days};
use tracing::debug;

use crate::clock::Clock;

/// Record completed work for a task on a day.
///
/// The requested amount is capped so `done` never exceeds `total`; a fully
/// capped request records nothing at all. In strict mode an incomplete task
/// gets its plan recomputed from `date` forward, leaving earlier days
/// untouched.
pub fn record_progress(
    state: &mut AppState,
    task_id: TaskId,
    date: NaiveDate,
    amount: u32,
    clock: &Clock,
) {
    let mode = state.settings.mode;
    let Some(index) = state.task_index(task_id) else {
        debug!(%task_id, "progress for unknown task ignored");
        return;
    };

    let task = &state.tasks[index];
    let new_done = task.done.saturating_add(amount).min(task.total);
    let effective = new_done - task.done;
    if effective == 0 {
        return;
    }

    state.logs.push(ProgressEntry {
        id: EntryId::new(),
        task_id,
        date,
        amount: effective,
        recorded_at: clock.now,
    });
    state.activity_log.insert(date);

    let task = &mut state.tasks[index];
    task.done = new_done;
    if new_done >= task.total {
        if task.completed_at.is_none() {
            task.completed_at = Some(clock.now);
        }
    } else {
        task.completed_at = None;
    }

    if mode == Mode::Strict && new_done < task.total {
        let remain = task.total - new_done;
        let forward = allocate(remain, &days(date, task.due_date), mode.config());
        task.plan.extend(forward);
    }
}

/// Remove the most recently appended ledger entry for a task/day pair.
///
/// "Most recent" means insertion order scanned from the tail, not the
/// latest `recorded_at` - the two can differ when entries share a
/// timestamp. The activity marker set never shrinks; an undone day keeps
/// its marker.
pub fn undo_progress(state: &mut AppState, task_id: TaskId, date: NaiveDate) {
    let mode = state.settings.mode;
    let Some(index) = state.task_index(task_id) else {
        debug!(%task_id, "undo for unknown task ignored");
        return;
    };

    let Some(log_index) = state
        .logs
        .iter()
        .rposition(|entry| entry.task_id == task_id && entry.date == date)
    else {
        debug!(%task_id, %date, "no ledger entry to undo");
        return;
    };
    let entry = state.logs.remove(log_index);

    let task = &mut state.tasks[index];
    task.done = task.done.saturating_sub(entry.amount);
    if task.done < task.total {
        task.completed_at = None;
    }

    if mode == Mode::Strict && task.done < task.total {
        let remain = task.total - task.done;
        let forward = allocate(remain, &days(date, task.due_date), mode.config());
        task.plan.extend(forward);
    }
}
