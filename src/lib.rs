//! Pomodoro - the world's most minimalist pomodoro timer
//!
//! A countdown that alternates between work sessions and breaks, ticking
//! once per second while running, served as a single page over HTTP.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Phase, TimerSnapshot, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
