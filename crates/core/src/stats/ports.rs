//! Port interfaces for focus analytics

use async_trait::async_trait;
use focustide_domain::{FocusStats, Result};

/// Trait for persisting the rolling focus counters
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Load the saved counters, if any.
    async fn load(&self) -> Result<Option<FocusStats>>;

    /// Persist the counters.
    async fn save(&self, stats: &FocusStats) -> Result<()>;
}
