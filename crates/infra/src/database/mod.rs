//! SQLite persistence
//!
//! A key-value `app_state` table backs the timer snapshot, duration
//! settings and focus counters; tasks get their own table. All repository
//! methods hop onto the blocking thread pool so the async runtime never
//! waits on SQLite.

pub mod manager;
pub mod state_store;
pub mod task_repository;

pub use manager::DbManager;
pub use state_store::SqliteStateStore;
pub use task_repository::SqliteTaskRepository;
