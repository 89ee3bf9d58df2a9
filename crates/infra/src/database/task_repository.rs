//! SQLite-backed task repository

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use focustide_core::tasks::TaskRepository;
use focustide_domain::{Result, Task};
use rusqlite::Row;
use tokio::task;

use super::manager::{map_join_error, DbManager};

/// SQLite task repository
pub struct SqliteTaskRepository {
    db: Arc<DbManager>,
}

impl SqliteTaskRepository {
    /// Construct a repository backed by the shared database manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let created_at: String = row.get(3)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(err),
            )
        })?;

    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        created_at,
    })
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn insert(&self, new_task: &Task) -> Result<()> {
        let db = Arc::clone(&self.db);
        let new_task = new_task.clone();
        task::spawn_blocking(move || {
            db.with_conn(|conn| {
                conn.execute(
                    "INSERT INTO tasks (id, text, completed, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![
                        new_task.id,
                        new_task.text,
                        i64::from(new_task.completed),
                        new_task.created_at.to_rfc3339(),
                    ],
                )
                .map(|_| ())
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get(&self, id: &str) -> Result<Option<Task>> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || {
            db.with_conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, text, completed, created_at FROM tasks WHERE id = ?1",
                )?;
                let mut rows = stmt.query([&id])?;
                match rows.next()? {
                    Some(row) => Ok(Some(task_from_row(row)?)),
                    None => Ok(None),
                }
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_completed(&self, id: &str, completed: bool) -> Result<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || {
            db.with_conn(|conn| {
                conn.execute(
                    "UPDATE tasks SET completed = ?1 WHERE id = ?2",
                    rusqlite::params![i64::from(completed), id],
                )
                .map(|_| ())
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let db = Arc::clone(&self.db);
        let id = id.to_string();
        task::spawn_blocking(move || {
            db.with_conn(|conn| {
                conn.execute("DELETE FROM tasks WHERE id = ?1", [&id]).map(|_| ())
            })
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let db = Arc::clone(&self.db);
        task::spawn_blocking(move || {
            db.with_conn(|conn| {
                // rowid breaks ties for tasks created within the same second.
                let mut stmt = conn.prepare(
                    "SELECT id, text, completed, created_at FROM tasks
                     ORDER BY created_at DESC, rowid DESC",
                )?;
                let tasks = stmt
                    .query_map([], task_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(tasks)
            })
        })
        .await
        .map_err(map_join_error)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> SqliteTaskRepository {
        SqliteTaskRepository::new(Arc::new(DbManager::in_memory().unwrap()))
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let repo = repository();
        let task = Task::new("write docs", Utc::now());

        repo.insert(&task).await.unwrap();
        let loaded = repo.get(&task.id).await.unwrap();

        assert_eq!(loaded.as_ref().map(|t| t.text.as_str()), Some("write docs"));
        assert_eq!(loaded.map(|t| t.completed), Some(false));
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let repo = repository();

        assert_eq!(repo.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_orders_newest_first() {
        let repo = repository();
        let now = Utc::now();
        let older = Task::new("older", now - chrono::Duration::seconds(10));
        let newer = Task::new("newer", now);
        repo.insert(&older).await.unwrap();
        repo.insert(&newer).await.unwrap();

        let tasks = repo.list().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "newer");
        assert_eq!(tasks[1].text, "older");
    }

    #[tokio::test]
    async fn set_completed_flips_the_flag() {
        let repo = repository();
        let task = Task::new("flip me", Utc::now());
        repo.insert(&task).await.unwrap();

        repo.set_completed(&task.id, true).await.unwrap();

        let loaded = repo.get(&task.id).await.unwrap().unwrap();
        assert!(loaded.completed);
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let repo = repository();
        let task = Task::new("goner", Utc::now());
        repo.insert(&task).await.unwrap();

        repo.delete(&task.id).await.unwrap();

        assert_eq!(repo.get(&task.id).await.unwrap(), None);
    }
}
