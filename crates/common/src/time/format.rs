//! Display formatting for countdowns and focus totals

/// Format a countdown as `M:SS`, the shape shown on the timer face.
///
/// # Examples
///
/// ```
/// use focustide_common::time::format_countdown;
///
/// assert_eq!(format_countdown(1500), "25:00");
/// assert_eq!(format_countdown(65), "1:05");
/// assert_eq!(format_countdown(0), "0:00");
/// ```
pub fn format_countdown(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

/// Format accumulated focus minutes as `Xh Ym`, collapsing to `Ym` under an
/// hour.
///
/// # Examples
///
/// ```
/// use focustide_common::time::format_focus_minutes;
///
/// assert_eq!(format_focus_minutes(45), "45m");
/// assert_eq!(format_focus_minutes(90), "1h 30m");
/// ```
pub fn format_focus_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}
