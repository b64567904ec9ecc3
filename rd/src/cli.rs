//! CLI argument parsing for robodash

use clap::{Parser, Subcommand};
use robotstore::{PriorityBucket, RecordId, TaskStatus};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rd")]
#[command(author, version, about = "Track robots and the tasks assigned to them", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding persisted state (overrides config)
    #[arg(short, long)]
    pub store_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage tasks
    Task {
        #[command(subcommand)]
        command: TaskCommand,
    },

    /// Manage robots
    Robot {
        #[command(subcommand)]
        command: RobotCommand,
    },

    /// Show the dashboard overview
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks, optionally filtered
    List {
        /// Match task names (case-insensitive) or ids
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Only tasks with this status (pending, in-progress, completed)
        #[arg(short, long)]
        status: Option<TaskStatus>,

        /// Only tasks in this priority bucket (high, medium, low)
        #[arg(short, long)]
        priority: Option<PriorityBucket>,
    },

    /// Add a task
    Add {
        /// Task name
        #[arg(short, long, default_value = "")]
        name: String,

        /// Id of the robot the task is assigned to
        #[arg(short, long)]
        robot: Option<RecordId>,

        /// Initial status
        #[arg(short, long, default_value = "Pending")]
        status: TaskStatus,

        /// Priority (1 or more)
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        priority: i64,
    },

    /// Replace fields of an existing task
    Update {
        /// Task id
        #[arg(required = true)]
        id: RecordId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        robot: Option<RecordId>,

        #[arg(short, long)]
        status: Option<TaskStatus>,

        #[arg(short, long, allow_negative_numbers = true)]
        priority: Option<i64>,
    },

    /// Delete a task
    Delete {
        /// Task id
        #[arg(required = true)]
        id: RecordId,
    },
}

#[derive(Subcommand, Debug)]
pub enum RobotCommand {
    /// List robots with their task counts
    List,

    /// Add a robot
    Add {
        /// Robot name
        #[arg(short, long, default_value = "")]
        name: String,

        /// What the robot does
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Replace fields of an existing robot
    Update {
        /// Robot id
        #[arg(required = true)]
        id: RecordId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a robot (its tasks are kept)
    Delete {
        /// Robot id
        #[arg(required = true)]
        id: RecordId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_task_list_filters() {
        let cli = Cli::parse_from(["rd", "task", "list", "-q", "clean", "--status", "in-progress", "-p", "high"]);
        match cli.command {
            Command::Task {
                command: TaskCommand::List {
                    search,
                    status,
                    priority,
                },
            } => {
                assert_eq!(search.as_deref(), Some("clean"));
                assert_eq!(status, Some(TaskStatus::InProgress));
                assert_eq!(priority, Some(PriorityBucket::High));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_priority() {
        let cli = Cli::parse_from(["rd", "task", "add", "-n", "x", "-r", "1", "-p", "-2"]);
        match cli.command {
            Command::Task {
                command: TaskCommand::Add { priority, status, .. },
            } => {
                assert_eq!(priority, -2);
                assert_eq!(status, TaskStatus::Pending);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
