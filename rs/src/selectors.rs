//! Derived views over the task and robot collections
//!
//! Everything here is a pure function of its inputs: single pass over each
//! collection, nothing is mutated.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{PriorityBucket, RecordId, Robot, Task, TaskStatus};

/// Number of tasks per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// Number of tasks per priority bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBuckets {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PriorityBuckets {
    pub fn get(&self, bucket: PriorityBucket) -> usize {
        match bucket {
            PriorityBucket::High => self.high,
            PriorityBucket::Medium => self.medium,
            PriorityBucket::Low => self.low,
        }
    }
}

/// Robot totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RobotAggregate {
    pub total_robots: usize,
    pub total_tasks: usize,
    /// Tasks divided by robots, 0 when there are no robots
    pub avg_tasks_per_robot: f64,
}

/// Everything the dashboard overview shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub status: StatusCounts,
    /// Completed tasks as a percentage of all tasks
    pub completion_rate: f64,
    pub priority: PriorityBuckets,
    pub robots: RobotAggregate,
}

/// Tasks assigned to one robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RobotWorkload {
    pub robot_id: RecordId,
    pub robot_name: String,
    pub total: usize,
    pub completed: usize,
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    tasks.iter().fold(
        StatusCounts {
            total: tasks.len(),
            ..Default::default()
        },
        |mut counts, task| {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
            counts
        },
    )
}

/// Completed tasks as a percentage in [0, 100]; 0 when there are no tasks
pub fn completion_rate(tasks: &[Task]) -> f64 {
    rate_from_counts(&status_counts(tasks))
}

fn rate_from_counts(counts: &StatusCounts) -> f64 {
    if counts.total == 0 {
        return 0.0;
    }
    counts.completed as f64 / counts.total as f64 * 100.0
}

pub fn priority_buckets(tasks: &[Task]) -> PriorityBuckets {
    tasks.iter().fold(PriorityBuckets::default(), |mut buckets, task| {
        match task.bucket() {
            PriorityBucket::High => buckets.high += 1,
            PriorityBucket::Medium => buckets.medium += 1,
            PriorityBucket::Low => buckets.low += 1,
        }
        buckets
    })
}

pub fn robot_aggregate(tasks: &[Task], robots: &[Robot]) -> RobotAggregate {
    let avg_tasks_per_robot = if robots.is_empty() {
        0.0
    } else {
        tasks.len() as f64 / robots.len() as f64
    };
    RobotAggregate {
        total_robots: robots.len(),
        total_tasks: tasks.len(),
        avg_tasks_per_robot,
    }
}

/// All dashboard figures in one call
pub fn dashboard(tasks: &[Task], robots: &[Robot]) -> DashboardStats {
    let status = status_counts(tasks);
    DashboardStats {
        status,
        completion_rate: rate_from_counts(&status),
        priority: priority_buckets(tasks),
        robots: robot_aggregate(tasks, robots),
    }
}

/// Name of the robot with the given id; `None` for an orphaned reference
pub fn robot_name(robot_id: RecordId, robots: &[Robot]) -> Option<&str> {
    robots.iter().find(|r| r.id == robot_id).map(|r| r.name.as_str())
}

/// Task totals for every robot, in robot order
///
/// Tasks pointing at robots that no longer exist are not counted here; see
/// [`orphaned_tasks`].
pub fn tasks_per_robot(tasks: &[Task], robots: &[Robot]) -> Vec<RobotWorkload> {
    let mut per_robot: HashMap<RecordId, (usize, usize)> = HashMap::with_capacity(robots.len());
    for task in tasks {
        let entry = per_robot.entry(task.robot_id).or_default();
        entry.0 += 1;
        if task.status == TaskStatus::Completed {
            entry.1 += 1;
        }
    }

    robots
        .iter()
        .map(|robot| {
            let (total, completed) = per_robot.get(&robot.id).copied().unwrap_or_default();
            RobotWorkload {
                robot_id: robot.id,
                robot_name: robot.name.clone(),
                total,
                completed,
            }
        })
        .collect()
}

/// Tasks whose robot does not exist
pub fn orphaned_tasks(tasks: &[Task], robots: &[Robot]) -> Vec<Task> {
    let known: HashSet<RecordId> = robots.iter().map(|r| r.id).collect();
    tasks.iter().filter(|t| !known.contains(&t.robot_id)).cloned().collect()
}

/// Combined search/status/priority filter for the task list
///
/// All set criteria must match. An empty query matches every task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of the name, or substring of the id
    pub query: String,
    pub status: Option<TaskStatus>,
    pub bucket: Option<PriorityBucket>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_bucket(mut self, bucket: PriorityBucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Whether any criterion is set
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.status.is_some() || self.bucket.is_some()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_query(task)
            && self.status.is_none_or(|status| task.status == status)
            && self.bucket.is_none_or(|bucket| bucket.contains(task.priority))
    }

    fn matches_query(&self, task: &Task) -> bool {
        if self.query.is_empty() {
            return true;
        }
        task.name.to_lowercase().contains(&self.query.to_lowercase()) || task.id.to_string().contains(&self.query)
    }
}

/// Tasks matching `filter`, in collection order
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// "N of M tasks" indicator shown while a filter is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub shown: usize,
    pub total: usize,
}

impl FilterSummary {
    pub fn new(shown: usize, total: usize) -> Self {
        Self { shown, total }
    }
}

impl std::fmt::Display for FilterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} tasks", self.shown, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn tasks() -> Vec<Task> {
        let mut tasks = seed::default_tasks();
        tasks.push(Task::new(12, "Inspect Roof", TaskStatus::Pending, 9, 5));
        tasks
    }

    #[test]
    fn test_status_counts() {
        let counts = status_counts(&tasks());
        assert_eq!(
            counts,
            StatusCounts {
                pending: 2,
                in_progress: 1,
                completed: 1,
                total: 4
            }
        );
        assert_eq!(counts.get(TaskStatus::Pending), 2);
    }

    #[test]
    fn test_completion_rate() {
        assert_eq!(completion_rate(&[]), 0.0);
        assert_eq!(completion_rate(&tasks()), 25.0);

        let all_done = vec![Task::new(1, "a", TaskStatus::Completed, 1, 1)];
        assert_eq!(completion_rate(&all_done), 100.0);
    }

    #[test]
    fn test_priority_buckets() {
        let buckets = priority_buckets(&tasks());
        assert_eq!(
            buckets,
            PriorityBuckets {
                high: 1,
                medium: 2,
                low: 1
            }
        );
        assert_eq!(buckets.get(PriorityBucket::Medium), 2);
    }

    #[test]
    fn test_robot_aggregate() {
        let robots = seed::default_robots();
        let aggregate = robot_aggregate(&tasks(), &robots);
        assert_eq!(aggregate.total_robots, 2);
        assert_eq!(aggregate.avg_tasks_per_robot, 2.0);

        assert_eq!(robot_aggregate(&tasks(), &[]).avg_tasks_per_robot, 0.0);
    }

    #[test]
    fn test_dashboard_bundles_everything() {
        let stats = dashboard(&seed::default_tasks(), &seed::default_robots());
        assert_eq!(stats.status.total, 3);
        assert!((stats.completion_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.priority.low, 1);
        assert_eq!(stats.robots.avg_tasks_per_robot, 1.5);
    }

    #[test]
    fn test_search_by_name_is_case_insensitive() {
        let filter = TaskFilter::new().with_query("CLEAN");
        let ids: Vec<_> = filter_tasks(&tasks(), &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_search_by_id_substring() {
        // "2" hits id 2 and id 12
        let filter = TaskFilter::new().with_query("2");
        let ids: Vec<_> = filter_tasks(&tasks(), &filter).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 12]);
    }

    #[test]
    fn test_filters_are_anded() {
        let filter = TaskFilter::new()
            .with_query("e")
            .with_status(TaskStatus::Pending)
            .with_bucket(PriorityBucket::High);
        let result = filter_tasks(&tasks(), &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Inspect Roof");
    }

    #[test]
    fn test_inactive_filter_keeps_everything() {
        let filter = TaskFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter_tasks(&tasks(), &filter), tasks());
        assert!(TaskFilter::new().with_bucket(PriorityBucket::Low).is_active());
    }

    #[test]
    fn test_filter_does_not_mutate_input() {
        let input = tasks();
        let copy = input.clone();
        let _ = filter_tasks(&input, &TaskFilter::new().with_status(TaskStatus::Completed));
        assert_eq!(input, copy);
    }

    #[test]
    fn test_robot_lookup_tolerates_orphans() {
        let robots = seed::default_robots();
        assert_eq!(robot_name(2, &robots), Some("Robot B"));
        assert_eq!(robot_name(9, &robots), None);

        let orphans = orphaned_tasks(&tasks(), &robots);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, 12);
    }

    #[test]
    fn test_tasks_per_robot() {
        let workload = tasks_per_robot(&tasks(), &seed::default_robots());
        assert_eq!(
            workload,
            vec![
                RobotWorkload {
                    robot_id: 1,
                    robot_name: "Robot A".to_string(),
                    total: 2,
                    completed: 1
                },
                RobotWorkload {
                    robot_id: 2,
                    robot_name: "Robot B".to_string(),
                    total: 1,
                    completed: 0
                },
            ]
        );
    }

    #[test]
    fn test_filter_summary_display() {
        assert_eq!(FilterSummary::new(2, 5).to_string(), "2 of 5 tasks");
    }
}
