//! The transition function composing planner and ledger.

use pacer_core::{AppState, Task, TaskId};
use pacer_plan::{allocate, days};
use tracing::debug;

use crate::action::Action;
use crate::clock::Clock;
use crate::ledger::{record_progress, undo_progress};

/// Apply one action to a snapshot and return the successor snapshot.
///
/// The input snapshot is never touched; callers holding it keep a valid
/// view. Invalid actions (missing ids, failed preconditions, unknown tags)
/// return an unchanged copy rather than an error.
pub fn reduce(state: &AppState, action: &Action, clock: &Clock) -> AppState {
    let mut next = state.clone();

    match action {
        Action::AddTask {
            title,
            total,
            unit,
            due_date,
            color,
        } => {
            if *total == 0 || *due_date < clock.today {
                debug!(%title, "rejected task: empty total or past due date");
                return next;
            }
            let mode = next.settings.mode;
            let plan = allocate(*total, &days(clock.today, *due_date), mode.config());
            next.tasks.push(Task {
                id: TaskId::new(),
                title: title.clone(),
                total: *total,
                unit: unit.clone(),
                due_date: *due_date,
                done: 0,
                plan,
                color: color.clone(),
                created_at: clock.now,
                completed_at: None,
                is_deleted: false,
            });
        }

        Action::UpdateTask { id, patch } => {
            let Some(index) = next.task_index(*id) else {
                return next;
            };
            let mode = next.settings.mode;
            let task = &mut next.tasks[index];
            patch.apply_to(task);
            if patch.reschedules() {
                let remain = task.total.saturating_sub(task.done);
                task.plan = allocate(remain, &days(clock.today, task.due_date), mode.config());
            }
        }

        Action::DeleteTask { id } => {
            if let Some(index) = next.task_index(*id) {
                next.tasks[index].is_deleted = true;
            }
        }

        Action::ReplanTask { id } => {
            let Some(index) = next.task_index(*id) else {
                return next;
            };
            if next.tasks[index].is_deleted {
                return next;
            }
            let mode = next.settings.mode;
            let task = &mut next.tasks[index];
            let remain = task.total.saturating_sub(task.done);
            task.plan = allocate(remain, &days(clock.today, task.due_date), mode.config());
        }

        Action::UpdateProgress { id, date, amount } => {
            record_progress(&mut next, *id, *date, *amount, clock);
        }

        Action::UndoProgress { id, date } => {
            undo_progress(&mut next, *id, *date);
        }

        Action::ChangeMode { mode } => {
            next.settings.mode = *mode;
            let config = mode.config();
            for task in next.tasks.iter_mut().filter(|t| !t.is_deleted) {
                let remain = task.total.saturating_sub(task.done);
                task.plan = allocate(remain, &days(clock.today, task.due_date), config);
            }
        }

        Action::Unknown => {
            debug!("unknown action ignored");
        }
    }

    next
}
