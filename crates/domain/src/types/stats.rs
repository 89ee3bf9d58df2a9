//! Focus analytics types
//!
//! Counters roll over lazily: day counters reset the first time they are
//! touched on a new day, and the week counter resets the first time it is
//! touched in a new Monday-anchored week. There is no background job that
//! zeroes them at midnight.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::task::Task;
use super::timer::DurationConfig;

/// Rolling focus counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusStats {
    pub today_focus_minutes: u32,
    pub today_sessions: u32,
    pub week_focus_minutes: u32,
    pub today_tasks: u32,
    pub last_focus_day: Option<NaiveDate>,
    pub last_task_day: Option<NaiveDate>,
    pub week_start: Option<NaiveDate>,
}

impl FocusStats {
    /// Monday that starts the week containing `date`.
    pub fn week_start_for(date: NaiveDate) -> NaiveDate {
        date - chrono::Duration::days(i64::from(date.weekday().num_days_from_monday()))
    }

    /// Reset any counter whose day or week has rolled over.
    ///
    /// Returns `true` if anything changed, so callers know whether the
    /// rolled-over state needs to be written back.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let mut changed = false;

        if self.last_focus_day.is_some() && self.last_focus_day != Some(today) {
            self.today_focus_minutes = 0;
            self.today_sessions = 0;
            self.last_focus_day = Some(today);
            changed = true;
        }

        if self.last_task_day.is_some() && self.last_task_day != Some(today) {
            self.today_tasks = 0;
            self.last_task_day = Some(today);
            changed = true;
        }

        let week = Self::week_start_for(today);
        if self.week_start != Some(week) {
            // A new week starts from whatever today has already accumulated.
            self.week_focus_minutes = self.today_focus_minutes;
            self.week_start = Some(week);
            changed = true;
        }

        changed
    }

    /// Record a completed focus session of `minutes`.
    pub fn record_focus_session(&mut self, minutes: u32, today: NaiveDate) {
        self.roll_over(today);
        self.today_focus_minutes += minutes;
        self.today_sessions += 1;
        self.week_focus_minutes += minutes;
        self.last_focus_day = Some(today);
    }

    /// Record a task marked as completed.
    pub fn record_task_completed(&mut self, today: NaiveDate) {
        self.roll_over(today);
        self.today_tasks += 1;
        self.last_task_day = Some(today);
    }
}

/// Bundle of analytics, tasks and settings produced by the export command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub analytics: FocusStats,
    pub tasks: Vec<Task>,
    pub settings: DurationConfig,
    pub exported_at: DateTime<Utc>,
}
