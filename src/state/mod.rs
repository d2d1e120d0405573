//! State management module
//!
//! The timer state machine, its serializable snapshot, and the controller
//! that owns both together with the ticker task.

pub mod app_state;
pub mod snapshot;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use snapshot::TimerSnapshot;
pub use timer_state::{Phase, TimerState};
