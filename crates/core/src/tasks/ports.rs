//! Port interfaces for task tracking

use async_trait::async_trait;
use focustide_domain::{Result, Task};

/// Trait for persisting tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task.
    async fn insert(&self, task: &Task) -> Result<()>;

    /// Fetch a task by id.
    async fn get(&self, id: &str) -> Result<Option<Task>>;

    /// Update the completion flag of a task.
    async fn set_completed(&self, id: &str, completed: bool) -> Result<()>;

    /// Delete a task by id.
    async fn delete(&self, id: &str) -> Result<()>;

    /// All tasks, newest first.
    async fn list(&self) -> Result<Vec<Task>>;
}
