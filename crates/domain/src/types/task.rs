//! Task tracking types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String, // UUIDv4
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// New pending task with a generated id.
    pub fn new(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self { id: Uuid::new_v4().to_string(), text: text.into(), completed: false, created_at }
    }
}

/// Aggregated task counts for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    /// Summarize a task list.
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        let total = tasks.len();
        Self { total, completed, pending: total - completed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_completed_and_pending() {
        let now = Utc::now();
        let mut tasks = vec![Task::new("write report", now), Task::new("review PR", now)];
        tasks[0].completed = true;

        let summary = TaskSummary::of(&tasks);

        assert_eq!(summary.total, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.pending, 1);
    }
}
