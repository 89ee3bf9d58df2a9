//! Analytics commands

use std::sync::Arc;
use std::time::Instant;

use focustide_domain::{ExportDocument, FocusStats, Result};

use crate::context::AppContext;
use crate::logging::log_command_execution;

/// Current focus counters, rolled over to today.
pub async fn overview(context: &Arc<AppContext>) -> Result<FocusStats> {
    let started = Instant::now();
    let result = context.stats.stats().await;
    log_command_execution("stats::overview", started.elapsed(), result.is_ok());
    result
}

/// Bundle analytics, tasks and settings into an export document.
pub async fn export(context: &Arc<AppContext>) -> Result<ExportDocument> {
    let started = Instant::now();
    let result = assemble_export(context).await;
    log_command_execution("stats::export", started.elapsed(), result.is_ok());
    result
}

async fn assemble_export(context: &Arc<AppContext>) -> Result<ExportDocument> {
    Ok(ExportDocument {
        analytics: context.stats.stats().await?,
        tasks: context.tasks.list_tasks().await?,
        settings: context.engine.durations(),
        exported_at: context.clock.utc_now(),
    })
}
