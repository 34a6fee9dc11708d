//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::TimerSnapshot;

/// Response to a posted UI event
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub status: String,
    /// Decoded command label, when the event was accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl EventResponse {
    /// Event decoded and forwarded to the engine
    pub fn accepted(command: &str, timer: TimerSnapshot) -> Self {
        Self {
            status: "accepted".to_string(),
            command: Some(command.to_string()),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Event was foreign or malformed and dropped at the boundary
    pub fn ignored(timer: TimerSnapshot) -> Self {
        Self {
            status: "ignored".to_string(),
            command: None,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Timer snapshot plus server information
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub panel_id: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_event: Option<String>,
    pub last_event_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
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
