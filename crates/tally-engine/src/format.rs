//! Duration display formatting.

/// Render a duration in seconds as `"<H>h <M>m"`.
///
/// Hours and leftover minutes both floor; any non-positive input renders as
/// `"0h 0m"`.
pub fn format_hours_minutes(seconds: i64) -> String {
    if seconds <= 0 {
        return "0h 0m".to_string();
    }
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{}h {}m", hours, minutes)
}
