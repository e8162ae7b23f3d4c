//! Pacer CLI - spread deadline work across the days left.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use pacer_core::{AppState, Mode, Task, TaskId, TaskPatch};
use pacer_engine::{reduce, Action, Clock};
use pacer_storage::{JsonStorage, Storage};
use tracing::{warn, Level};

#[derive(Parser)]
#[command(name = "pacer")]
#[command(about = "Deadline pacing for quantified tasks", long_about = None)]
struct Cli {
    /// Snapshot file location
    #[arg(long, default_value = ".pacer/state.json")]
    data: std::path::PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Total quantity to complete
        #[arg(long)]
        total: u32,
        /// Unit label (page, min, ...)
        #[arg(long, default_value = "page")]
        unit: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// Display color tag
        #[arg(long, default_value = "#4ECDC4")]
        color: String,
    },
    /// List tasks
    List {
        /// Include soft-deleted tasks
        #[arg(long)]
        all: bool,
    },
    /// Show task details and its day-by-day plan
    Show {
        /// Task ID
        id: String,
    },
    /// Record completed work
    Log {
        /// Task ID
        id: String,
        /// Amount completed
        amount: u32,
        /// Day to credit, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Undo the latest progress entry for a day
    Undo {
        /// Task ID
        id: String,
        /// Day to undo, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Edit task fields; changing total or due date replans
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New total quantity
        #[arg(long)]
        total: Option<u32>,
        /// New unit label
        #[arg(long)]
        unit: Option<String>,
        /// New due date
        #[arg(long)]
        due: Option<NaiveDate>,
        /// New color tag
        #[arg(long)]
        color: Option<String>,
    },
    /// Recompute a task's plan from today
    Replan {
        /// Task ID
        id: String,
    },
    /// Soft-delete a task (history is kept)
    Remove {
        /// Task ID
        id: String,
    },
    /// Switch pacing mode (gentle | strict)
    Mode {
        /// Mode name
        mode: String,
    },
    /// Summarize tasks and the activity streak
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();
    let mut storage = JsonStorage::new(&cli.data).await?;
    let state = storage.load_or_default().await;
    let clock = Clock::at(Utc::now());

    match cli.command {
        Commands::Add {
            title,
            total,
            unit,
            due,
            color,
        } => {
            let action = Action::AddTask {
                title,
                total,
                unit,
                due_date: due,
                color,
            };
            let next = reduce(&state, &action, &clock);
            match next.tasks.last().filter(|_| next.tasks.len() > state.tasks.len()) {
                Some(task) => {
                    println!(
                        "Added {} | {} | {} {} by {}",
                        task.id, task.title, task.total, task.unit, task.due_date
                    );
                    println!("  today's target: {}", task.planned_for(clock.today));
                }
                None => println!("Rejected: total must be positive and due date must not be in the past"),
            }
            persist(&mut storage, &next).await;
        }
        Commands::List { all } => {
            let tasks: Vec<&Task> = state
                .tasks
                .iter()
                .filter(|t| all || !t.is_deleted)
                .collect();
            println!("Tasks ({})", tasks.len());
            for task in tasks {
                println!(
                    "  {} | {:>4}/{:<4} {} | due {} | today {}{}",
                    task.id,
                    task.done,
                    task.total,
                    task.unit,
                    task.due_date,
                    task.planned_for(clock.today),
                    if task.is_deleted { " | deleted" } else { "" },
                );
            }
        }
        Commands::Show { id } => {
            let task_id = parse_task_id(&id)?;
            let Some(task) = state.task(task_id) else {
                println!("Task not found");
                return Ok(());
            };

            println!("Task: {}", task.id);
            println!("  Title: {}", task.title);
            println!("  Progress: {}/{} {}", task.done, task.total, task.unit);
            println!("  Due: {}", task.due_date);
            println!("  Mode: {}", state.settings.mode);
            println!("  Done today: {}", state.done_on(task_id, clock.today));
            if let Some(completed_at) = task.completed_at {
                println!("  Completed: {}", completed_at);
            }
            println!("  Plan:");
            for (day, amount) in &task.plan {
                println!("    {} {:>5}", day, amount);
            }
        }
        Commands::Log { id, amount, date } => {
            let task_id = parse_task_id(&id)?;
            let Some(before) = state.task(task_id) else {
                println!("Task not found");
                return Ok(());
            };
            let done_before = before.done;
            let date = date.unwrap_or(clock.today);

            let action = Action::UpdateProgress {
                id: task_id,
                date,
                amount,
            };
            let next = reduce(&state, &action, &clock);
            let task = next.task(task_id).expect("task survives progress");
            let recorded = task.done - done_before;
            if recorded == 0 {
                println!("Nothing recorded: {} is already complete", task.title);
            } else {
                println!(
                    "Recorded {} {} for {} on {} ({}/{})",
                    recorded, task.unit, task.title, date, task.done, task.total
                );
                if task.is_complete() {
                    println!("  Task complete!");
                }
            }
            persist(&mut storage, &next).await;
        }
        Commands::Undo { id, date } => {
            let task_id = parse_task_id(&id)?;
            if state.task(task_id).is_none() {
                println!("Task not found");
                return Ok(());
            }
            let date = date.unwrap_or(clock.today);

            let next = reduce(&state, &Action::UndoProgress { id: task_id, date }, &clock);
            if next.logs.len() == state.logs.len() {
                println!("No entry to undo for {}", date);
            } else {
                let task = next.task(task_id).expect("task survives undo");
                println!(
                    "Undid the latest entry for {} ({}/{} {})",
                    date, task.done, task.total, task.unit
                );
            }
            persist(&mut storage, &next).await;
        }
        Commands::Edit {
            id,
            title,
            total,
            unit,
            due,
            color,
        } => {
            let task_id = parse_task_id(&id)?;
            if state.task(task_id).is_none() {
                println!("Task not found");
                return Ok(());
            }

            let patch = TaskPatch {
                title,
                total,
                unit,
                due_date: due,
                color,
            };
            let replanned = patch.reschedules();
            let next = reduce(&state, &Action::UpdateTask { id: task_id, patch }, &clock);
            let task = next.task(task_id).expect("task survives edit");
            println!("Updated {} | {}", task.id, task.title);
            if replanned {
                println!(
                    "  replanned: {} {} left, today's target {}",
                    task.remaining(),
                    task.unit,
                    task.planned_for(clock.today)
                );
            }
            persist(&mut storage, &next).await;
        }
        Commands::Replan { id } => {
            let task_id = parse_task_id(&id)?;
            let Some(task) = state.task(task_id) else {
                println!("Task not found");
                return Ok(());
            };
            if task.is_deleted {
                println!("Task is deleted; restore it before replanning");
                return Ok(());
            }

            let next = reduce(&state, &Action::ReplanTask { id: task_id }, &clock);
            let task = next.task(task_id).expect("task survives replan");
            println!(
                "Replanned {} from {}: today's target {}",
                task.title,
                clock.today,
                task.planned_for(clock.today)
            );
            persist(&mut storage, &next).await;
        }
        Commands::Remove { id } => {
            let task_id = parse_task_id(&id)?;
            let Some(task) = state.task(task_id) else {
                println!("Task not found");
                return Ok(());
            };
            let title = task.title.clone();

            let next = reduce(&state, &Action::DeleteTask { id: task_id }, &clock);
            println!("Removed {} (history kept)", title);
            persist(&mut storage, &next).await;
        }
        Commands::Mode { mode } => {
            let mode = Mode::parse(&mode);
            let next = reduce(&state, &Action::ChangeMode { mode }, &clock);
            let live = next.tasks.iter().filter(|t| !t.is_deleted).count();
            println!("Mode set to {mode}; replanned {live} task(s)");
            persist(&mut storage, &next).await;
        }
        Commands::Status => {
            let live: Vec<&Task> = state.tasks.iter().filter(|t| !t.is_deleted).collect();
            let completed = live.iter().filter(|t| t.is_complete()).count();

            println!("Pacer status ({} mode)", state.settings.mode);
            println!("  Tasks: {} active, {} complete", live.len() - completed, completed);
            println!("  Streak: {} day(s)", state.streak_days());
            for task in live.iter().filter(|t| !t.is_complete()) {
                println!(
                    "  {} | today {} {} | done today {}",
                    task.title,
                    task.planned_for(clock.today),
                    task.unit,
                    state.done_on(task.id, clock.today)
                );
            }
        }
    }

    Ok(())
}

fn parse_task_id(s: &str) -> Result<TaskId> {
    s.parse().map_err(|_| anyhow::anyhow!("Invalid task ID"))
}

async fn persist(storage: &mut JsonStorage, state: &AppState) {
    if let Err(error) = storage.save(state).await {
        warn!(%error, "failed to persist snapshot; this run's changes were not saved");
    }
}
