//! Command handlers
//!
//! Each handler validates its input, applies at most one mutation to the
//! store and writes a human-readable result to `out`.

use std::io::Write;

use colored::*;
use eyre::{Result, eyre};
use robotstore::selectors::{self, FilterSummary, TaskFilter};
use robotstore::{
    DashboardStore, PriorityBucket, RecordId, Robot, RobotForm, Task, TaskForm, TaskStatus, ValidationErrors,
};
use tracing::{debug, info, warn};

use crate::cli::{RobotCommand, TaskCommand};

/// Run a `task` subcommand
pub fn task(store: &mut DashboardStore, command: TaskCommand, out: &mut impl Write) -> Result<()> {
    match command {
        TaskCommand::List {
            search,
            status,
            priority,
        } => list_tasks(store, search, status, priority, out),
        TaskCommand::Add {
            name,
            robot,
            status,
            priority,
        } => {
            let form = TaskForm {
                name,
                status,
                robot_id: robot,
                priority,
            };
            let draft = form.validate().map_err(|e| invalid("task", &e))?;
            let task = store.add_task(draft)?;
            info!(id = task.id, "Task added");
            writeln!(out, "{} Added task {}: {}", "✓".green(), task.id, task.name.cyan())?;
            warn_unknown_robot(store, task.robot_id, out)
        }
        TaskCommand::Update {
            id,
            name,
            robot,
            status,
            priority,
        } => {
            let existing = store
                .task(id)
                .cloned()
                .ok_or_else(|| eyre!("Task not found: {}", id))?;
            let form = TaskForm {
                name: name.unwrap_or(existing.name),
                status: status.unwrap_or(existing.status),
                robot_id: Some(robot.unwrap_or(existing.robot_id)),
                priority: priority.unwrap_or(i64::from(existing.priority)),
            };
            let draft = form.validate().map_err(|e| invalid("task", &e))?;
            let task = Task::new(id, draft.name, draft.status, draft.robot_id, draft.priority);
            store.update_task(task.clone())?;
            info!(id, "Task updated");
            writeln!(out, "{} Updated task {}: {}", "✓".green(), id, task.name.cyan())?;
            match robot {
                Some(robot_id) => warn_unknown_robot(store, robot_id, out),
                None => Ok(()),
            }
        }
        TaskCommand::Delete { id } => {
            let removed = store.delete_task(id)?;
            if removed == 0 {
                writeln!(out, "No task with id {}", id)?;
            } else {
                info!(id, "Task deleted");
                writeln!(out, "{} Deleted task {}", "✓".green(), id)?;
            }
            Ok(())
        }
    }
}

/// Run a `robot` subcommand
pub fn robot(store: &mut DashboardStore, command: RobotCommand, out: &mut impl Write) -> Result<()> {
    match command {
        RobotCommand::List => list_robots(store, out),
        RobotCommand::Add { name, description } => {
            let draft = RobotForm { name, description }
                .validate()
                .map_err(|e| invalid("robot", &e))?;
            let robot = store.add_robot(draft)?;
            info!(id = robot.id, "Robot added");
            writeln!(out, "{} Added robot {}: {}", "✓".green(), robot.id, robot.name.cyan())?;
            Ok(())
        }
        RobotCommand::Update { id, name, description } => {
            let existing = store
                .robot(id)
                .cloned()
                .ok_or_else(|| eyre!("Robot not found: {}", id))?;
            let draft = RobotForm {
                name: name.unwrap_or(existing.name),
                description: description.unwrap_or(existing.description),
            }
            .validate()
            .map_err(|e| invalid("robot", &e))?;
            let robot = Robot::new(id, draft.name, draft.description);
            store.update_robot(robot.clone())?;
            info!(id, "Robot updated");
            writeln!(out, "{} Updated robot {}: {}", "✓".green(), id, robot.name.cyan())?;
            Ok(())
        }
        RobotCommand::Delete { id } => {
            let removed = store.delete_robot(id)?;
            if removed == 0 {
                writeln!(out, "No robot with id {}", id)?;
            } else {
                info!(id, "Robot deleted");
                writeln!(out, "{} Deleted robot {}", "✓".green(), id)?;
            }
            Ok(())
        }
    }
}

/// Print the dashboard overview
pub fn stats(store: &DashboardStore, out: &mut impl Write) -> Result<()> {
    let tasks = store.tasks();
    let robots = store.robots();
    let stats = selectors::dashboard(&tasks, &robots);
    debug!(?stats, "stats: computed");

    writeln!(out, "{}", "Dashboard Overview".bold())?;
    writeln!(out, "  Total Tasks:      {}", stats.status.total)?;
    writeln!(out, "  Completed:        {}", stats.status.completed.to_string().green())?;
    writeln!(out, "  In Progress:      {}", stats.status.in_progress.to_string().yellow())?;
    writeln!(out, "  Pending:          {}", stats.status.pending.to_string().red())?;
    writeln!(out, "  Completion Rate:  {:.1}%", stats.completion_rate)?;
    writeln!(out, "{}", "Robots".bold())?;
    writeln!(out, "  Total Robots:     {}", stats.robots.total_robots)?;
    writeln!(out, "  Avg Tasks/Robot:  {:.1}", stats.robots.avg_tasks_per_robot)?;
    writeln!(out, "{}", "Priority".bold())?;
    writeln!(
        out,
        "  High: {}  Medium: {}  Low: {}",
        stats.priority.high, stats.priority.medium, stats.priority.low
    )?;
    Ok(())
}

fn list_tasks(
    store: &DashboardStore,
    search: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<PriorityBucket>,
    out: &mut impl Write,
) -> Result<()> {
    let filter = TaskFilter {
        query: search.unwrap_or_default(),
        status,
        bucket: priority,
    };
    let tasks = store.tasks();
    let robots = store.robots();
    let shown = selectors::filter_tasks(&tasks, &filter);

    if shown.is_empty() {
        writeln!(out, "No tasks found")?;
    } else {
        writeln!(
            out,
            "{}",
            format!("{:>4}  {:<24} {:<12} {:<16} {}", "ID", "NAME", "STATUS", "ROBOT", "PRIORITY").dimmed()
        )?;
        for task in &shown {
            writeln!(
                out,
                "{:>4}  {:<24} {:<12} {:<16} {} ({})",
                task.id,
                task.name,
                task.status.to_string(),
                robot_label(task.robot_id, &robots),
                task.priority,
                task.bucket()
            )?;
        }
    }

    if filter.is_active() {
        writeln!(out, "{}", FilterSummary::new(shown.len(), tasks.len()).to_string().cyan())?;
    }
    Ok(())
}

fn list_robots(store: &DashboardStore, out: &mut impl Write) -> Result<()> {
    let tasks = store.tasks();
    let robots = store.robots();
    if robots.is_empty() {
        writeln!(out, "No robots found")?;
        return Ok(());
    }

    writeln!(
        out,
        "{}",
        format!("{:>4}  {:<16} {:<28} {}", "ID", "NAME", "DESCRIPTION", "TASKS").dimmed()
    )?;
    let workloads = selectors::tasks_per_robot(&tasks, &robots);
    for (robot, workload) in robots.iter().zip(workloads) {
        writeln!(
            out,
            "{:>4}  {:<16} {:<28} {}/{} done",
            robot.id, robot.name, robot.description, workload.completed, workload.total
        )?;
    }

    let orphans = selectors::orphaned_tasks(&tasks, &robots);
    if !orphans.is_empty() {
        writeln!(
            out,
            "{}",
            format!("{} task(s) assigned to robots that no longer exist", orphans.len()).yellow()
        )?;
    }
    Ok(())
}

fn robot_label(robot_id: RecordId, robots: &[Robot]) -> String {
    match selectors::robot_name(robot_id, robots) {
        Some(name) => name.to_string(),
        None => format!("#{} (missing)", robot_id),
    }
}

fn warn_unknown_robot(store: &DashboardStore, robot_id: RecordId, out: &mut impl Write) -> Result<()> {
    if selectors::robot_name(robot_id, &store.robots()).is_none() {
        warn!(robot_id, "Task assigned to a robot that does not exist");
        writeln!(out, "{}", format!("Warning: robot {} does not exist", robot_id).yellow())?;
    }
    Ok(())
}

/// Report every failed field and turn the failure into an error
fn invalid(kind: &str, errors: &ValidationErrors) -> eyre::Report {
    for error in &errors.errors {
        eprintln!("{} {}", "✗".red(), error);
    }
    eyre!("Invalid {}: {} field(s) failed validation", kind, errors.len())
}
