//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Default session durations (minutes)
pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

// Keys in the app_state key-value table
pub const KEY_TIMER_SNAPSHOT: &str = "timer_snapshot";
pub const KEY_DURATIONS: &str = "durations";
pub const KEY_FOCUS_STATS: &str = "focus_stats";

// Scheduling
pub const COMPLETION_ALARM_NAME: &str = "session-complete";
pub const TICK_INTERVAL_MS: u64 = 1_000;

// Event bus configuration
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
