//! Utility functions module
//!
//! Clock formatting and shutdown signal handling.

pub mod format;
pub mod signals;

// Re-export main functions
pub use format::{format_clock, format_time, page_title};
pub use signals::shutdown_signal;
