//! Background tasks module
//!
//! Tasks that run alongside the HTTP server.

pub mod ticker;

// Re-export main functions
pub use ticker::ticker_task;
