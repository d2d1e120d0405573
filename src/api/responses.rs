//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerSnapshot;

/// Fixed page description
pub const DESCRIPTION: &str = "the world's most minimalist pomodoro timer";

/// Response for the start/stop, skip and reset commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub action: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl CommandResponse {
    pub fn new(action: &str, message: String, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            message,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Social preview image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenGraphImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

impl Default for OpenGraphImage {
    fn default() -> Self {
        Self {
            url: "/og.png".to_string(),
            width: 1200,
            height: 630,
            alt: "pomodoro timer".to_string(),
        }
    }
}

/// Page metadata derived from the timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Live clock while running, `pomodoro` otherwise
    pub title: String,
    pub description: String,
    /// Always the live clock
    pub og_title: String,
    pub og_image: OpenGraphImage,
}

impl PageMeta {
    pub fn from_snapshot(timer: &TimerSnapshot) -> Self {
        Self {
            title: timer.title.clone(),
            description: DESCRIPTION.to_string(),
            og_title: timer.clock(),
            og_image: OpenGraphImage::default(),
        }
    }
}

/// Status response with timer and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub clock: String,
    pub page: PageMeta,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
