use std::time::Duration;

/// Format a `Duration` as `MM:SS`. Minutes are not capped at 59.
pub fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Format raw seconds as `MM:SS`; negative or non-finite input shows `00:00`.
pub fn format_seconds(secs: f64) -> String {
    let d = Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO);
    format_mmss(d)
}
