//! Clock text formatting

/// Title shown while the timer is paused
pub const IDLE_TITLE: &str = "pomodoro";

/// Split seconds into zero-padded minute and second text, e.g. 65 -> ("01", "05")
pub fn format_time(remaining_seconds: u64) -> (String, String) {
    let minutes = remaining_seconds / 60;
    let seconds = remaining_seconds % 60;
    (format!("{:02}", minutes), format!("{:02}", seconds))
}

/// `MM:SS` clock text
pub fn format_clock(remaining_seconds: u64) -> String {
    let (minutes, seconds) = format_time(remaining_seconds);
    format!("{}:{}", minutes, seconds)
}

/// Page title: the live clock while running, a static label otherwise
pub fn page_title(remaining_seconds: u64, running: bool) -> String {
    if running {
        format_clock(remaining_seconds)
    } else {
        IDLE_TITLE.to_string()
    }
}
