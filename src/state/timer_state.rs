//! Timer state structure and phase transitions

use serde::{Deserialize, Serialize};

/// Default session length in minutes
pub const DEFAULT_SESSION_MINUTES: u64 = 25;
/// Default break length in minutes
pub const DEFAULT_BREAK_MINUTES: u64 = 5;

/// Which half of the pomodoro cycle is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Session,
    Break,
}

impl Phase {
    /// The other phase of the cycle
    pub fn opposite(self) -> Self {
        match self {
            Phase::Session => Phase::Break,
            Phase::Break => Phase::Session,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Session => "session",
            Phase::Break => "break",
        }
    }
}

/// Countdown state for one pomodoro view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub session_length_minutes: u64,
    pub break_length_minutes: u64,
    pub remaining_seconds: u64,
    pub running: bool,
    pub phase: Phase,
    /// Starts at 1 and grows each time a session counts down to zero.
    /// Tracked but never shown in the view.
    pub session_count: u64,
}

impl TimerState {
    /// Create a paused timer at the start of a session
    pub fn new(session_length_minutes: u64, break_length_minutes: u64) -> Self {
        Self {
            session_length_minutes,
            break_length_minutes,
            remaining_seconds: session_length_minutes * 60,
            running: false,
            phase: Phase::Session,
            session_count: 1,
        }
    }

    pub fn is_session(&self) -> bool {
        self.phase == Phase::Session
    }

    /// Full length of the given phase in seconds
    pub fn phase_length_seconds(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Session => self.session_length_minutes * 60,
            Phase::Break => self.break_length_minutes * 60,
        }
    }

    /// Flip the running flag, leaving phase and remaining time alone.
    /// Returns the new value of the flag.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Jump to the opposite phase at its full length. Running flag is kept.
    pub fn skip(&mut self) {
        self.enter(self.phase.opposite());
    }

    /// Pause and rewind the current phase to its full length.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_seconds = self.phase_length_seconds(self.phase);
    }

    /// Count down one second. Reaching zero rolls straight into the next phase.
    /// Returns true if the phase changed.
    pub fn tick(&mut self) -> bool {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds > 0 {
            return false;
        }

        if self.is_session() {
            self.session_count += 1;
        }
        self.enter(self.phase.opposite());
        true
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_seconds = self.phase_length_seconds(phase);
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_paused_session() {
        let state = TimerState::default();
        assert_eq!(state.phase, Phase::Session);
        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 1500);
        assert_eq!(state.session_count, 1);
    }

    #[test]
    fn toggle_only_flips_running() {
        let mut state = TimerState::default();
        state.remaining_seconds = 42;

        assert!(state.toggle_running());
        assert!(!state.toggle_running());
        assert_eq!(state.remaining_seconds, 42);
        assert_eq!(state.phase, Phase::Session);
    }

    #[test]
    fn skip_flips_phase_and_keeps_running_flag() {
        for running in [false, true] {
            let mut state = TimerState::default();
            state.running = running;
            state.remaining_seconds = 17;

            state.skip();
            assert_eq!(state.phase, Phase::Break);
            assert_eq!(state.remaining_seconds, 300);
            assert_eq!(state.running, running);

            state.remaining_seconds = 3;
            state.skip();
            assert_eq!(state.phase, Phase::Session);
            assert_eq!(state.remaining_seconds, 1500);
            assert_eq!(state.running, running);
        }
    }

    #[test]
    fn skip_does_not_count_a_completed_session() {
        let mut state = TimerState::default();
        state.skip();
        assert_eq!(state.session_count, 1);
    }

    #[test]
    fn reset_pauses_and_keeps_phase() {
        let mut state = TimerState::default();
        state.skip();
        state.running = true;
        state.remaining_seconds = 10;

        state.reset();
        assert_eq!(state.phase, Phase::Break);
        assert!(!state.running);
        assert_eq!(state.remaining_seconds, 300);
    }

    #[test]
    fn full_session_rolls_into_break() {
        let mut state = TimerState::default();
        state.toggle_running();

        for _ in 0..1499 {
            assert!(!state.tick());
        }
        assert!(state.tick());

        assert_eq!(state.phase, Phase::Break);
        assert_eq!(state.remaining_seconds, 300);
        assert_eq!(state.session_count, 2);
        assert!(state.running);
    }

    #[test]
    fn last_second_of_session_switches_to_break() {
        let mut state = TimerState::default();
        state.running = true;
        state.remaining_seconds = 1;

        state.tick();
        assert_eq!(state.phase, Phase::Break);
        assert_eq!(state.remaining_seconds, state.break_length_minutes * 60);
    }

    #[test]
    fn break_end_returns_to_session_without_counting() {
        let mut state = TimerState::new(1, 1);
        state.skip();

        for _ in 0..60 {
            state.tick();
        }
        assert_eq!(state.phase, Phase::Session);
        assert_eq!(state.remaining_seconds, 60);
        assert_eq!(state.session_count, 1);
    }

    #[test]
    fn remaining_never_sits_at_zero() {
        let mut state = TimerState::new(1, 1);
        for _ in 0..500 {
            state.tick();
            assert!(state.remaining_seconds > 0);
        }
    }
}
