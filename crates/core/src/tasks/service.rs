//! Task tracking service

use std::sync::Arc;

use focustide_common::time::Clock;
use focustide_domain::{FocusTideError, Result, Task, TaskSummary};
use tracing::{info, warn};

use super::ports::TaskRepository;
use crate::stats::StatsService;

/// Task tracking service
///
/// Completing a task feeds the daily task counter in the analytics, the
/// same way a completed focus session feeds the focus counters.
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    stats: Arc<StatsService>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    /// Create a new task service.
    pub fn new(
        repository: Arc<dyn TaskRepository>,
        stats: Arc<StatsService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repository, stats, clock }
    }

    /// Add a new pending task.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the text is empty after trimming.
    pub async fn add_task(&self, text: &str) -> Result<Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FocusTideError::InvalidInput("task text must not be empty".to_string()));
        }

        let task = Task::new(text, self.clock.utc_now());
        self.repository.insert(&task).await?;
        info!(task_id = %task.id, "task added");
        Ok(task)
    }

    /// Flip the completion flag of a task.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no task has the given id.
    pub async fn toggle_task(&self, id: &str) -> Result<Task> {
        let mut task = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| FocusTideError::NotFound(format!("task {id}")))?;

        task.completed = !task.completed;
        self.repository.set_completed(&task.id, task.completed).await?;

        if task.completed {
            // Analytics are best effort; a counter miss must not fail the
            // toggle the user just performed.
            if let Err(err) = self.stats.record_task_completed().await {
                warn!(error = %err, "failed to update task analytics");
            }
        }

        Ok(task)
    }

    /// Delete a task.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.repository.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// All tasks, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.repository.list().await
    }

    /// Aggregated task counts for display.
    pub async fn summary(&self) -> Result<TaskSummary> {
        Ok(TaskSummary::of(&self.list_tasks().await?))
    }
}
