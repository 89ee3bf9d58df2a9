//! Timer scheduling
//!
//! Two cooperating drivers: the background one-shot completion alarm,
//! which is the durability backstop, and the foreground per-second ticker,
//! which exists only while a view is attached. Both are tokio tasks
//! stopped through cancellation tokens.

pub mod alarm;
pub mod ticker;

pub use alarm::AlarmScheduler;
pub use ticker::ForegroundTicker;
