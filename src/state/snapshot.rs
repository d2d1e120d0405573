//! Serializable view of the timer handed to the presentation layer

use serde::{Deserialize, Serialize};

use super::{Phase, TimerState};
use crate::utils::{format_time, page_title};

/// Everything a view needs to render the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub remaining_seconds: u64,
    pub session_count: u64,
    pub session_length_minutes: u64,
    pub break_length_minutes: u64,
    /// Zero-padded minute text
    pub minutes: String,
    /// Zero-padded second text
    pub seconds: String,
    pub title: String,
}

impl From<&TimerState> for TimerSnapshot {
    fn from(state: &TimerState) -> Self {
        let (minutes, seconds) = format_time(state.remaining_seconds);
        Self {
            phase: state.phase,
            running: state.running,
            remaining_seconds: state.remaining_seconds,
            session_count: state.session_count,
            session_length_minutes: state.session_length_minutes,
            break_length_minutes: state.break_length_minutes,
            minutes,
            seconds,
            title: page_title(state.remaining_seconds, state.running),
        }
    }
}

impl TimerSnapshot {
    /// `MM:SS` clock text
    pub fn clock(&self) -> String {
        format!("{}:{}", self.minutes, self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_carries_formatted_clock() {
        let mut state = TimerState::default();
        state.remaining_seconds = 65;

        let snapshot = TimerSnapshot::from(&state);
        assert_eq!(snapshot.minutes, "01");
        assert_eq!(snapshot.seconds, "05");
        assert_eq!(snapshot.clock(), "01:05");
        assert_eq!(snapshot.title, "pomodoro");

        state.running = true;
        assert_eq!(TimerSnapshot::from(&state).title, "01:05");
    }

    #[test]
    fn phase_serializes_lowercase() {
        let snapshot = TimerSnapshot::from(&TimerState::default());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["phase"], "session");
        assert_eq!(json["remaining_seconds"], 1500);
    }
}
