//! Application configuration structures

use serde::{Deserialize, Serialize};

use crate::types::DurationConfig;

/// Top-level application configuration
///
/// Every field has a default so partial config files and bare environments
/// both work; configuration is never a startup blocker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    /// Seed durations applied on first run, before any settings have been
    /// saved. Afterwards the persisted settings are the authority.
    pub timer: DurationConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file path. `:memory:` is accepted for ephemeral use.
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "focustide.db".to_string() }
    }
}
