//! In-memory stats repository shared by core service tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use focustide_domain::{FocusStats, FocusTideError, Result};
use parking_lot::Mutex;

use super::ports::StatsRepository;

#[derive(Default)]
pub struct MemoryStatsRepository {
    pub stored: Mutex<Option<FocusStats>>,
    pub fail_loads: AtomicBool,
}

#[async_trait]
impl StatsRepository for MemoryStatsRepository {
    async fn load(&self) -> Result<Option<FocusStats>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(FocusTideError::Storage("simulated read failure".to_string()));
        }
        Ok(self.stored.lock().clone())
    }

    async fn save(&self, stats: &FocusStats) -> Result<()> {
        *self.stored.lock() = Some(stats.clone());
        Ok(())
    }
}
