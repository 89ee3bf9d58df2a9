//! Task commands

use std::sync::Arc;
use std::time::Instant;

use focustide_domain::{Result, Task, TaskSummary};

use crate::context::AppContext;
use crate::logging::log_command_execution;

/// Add a new pending task.
pub async fn add_task(context: &Arc<AppContext>, text: &str) -> Result<Task> {
    let started = Instant::now();
    let result = context.tasks.add_task(text).await;
    log_command_execution("tasks::add_task", started.elapsed(), result.is_ok());
    result
}

/// Flip the completion flag of a task.
pub async fn toggle_task(context: &Arc<AppContext>, id: &str) -> Result<Task> {
    let started = Instant::now();
    let result = context.tasks.toggle_task(id).await;
    log_command_execution("tasks::toggle_task", started.elapsed(), result.is_ok());
    result
}

/// Delete a task.
pub async fn delete_task(context: &Arc<AppContext>, id: &str) -> Result<()> {
    let started = Instant::now();
    let result = context.tasks.delete_task(id).await;
    log_command_execution("tasks::delete_task", started.elapsed(), result.is_ok());
    result
}

/// All tasks, newest first.
pub async fn list_tasks(context: &Arc<AppContext>) -> Result<Vec<Task>> {
    let started = Instant::now();
    let result = context.tasks.list_tasks().await;
    log_command_execution("tasks::list_tasks", started.elapsed(), result.is_ok());
    result
}

/// Aggregated task counts.
pub async fn summary(context: &Arc<AppContext>) -> Result<TaskSummary> {
    context.tasks.summary().await
}
