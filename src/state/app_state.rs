//! Shared application state for the HTTP API layer

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use tracing::warn;

use crate::config::TimerConfig;
use crate::events::TimerCommand;

use super::TimerSnapshot;

/// Most recent UI event accepted by the server
#[derive(Debug, Clone)]
pub struct LastEvent {
    pub description: String,
    pub at: DateTime<Utc>,
}

/// Application state shared across API handlers
#[derive(Debug)]
pub struct AppState {
    /// Timer panel configuration
    pub timer_config: Arc<TimerConfig>,
    /// Command channel into the engine task
    pub command_tx: mpsc::Sender<TimerCommand>,
    /// Latest snapshot published by the engine
    pub snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last event tracking
    pub last_event: Mutex<Option<LastEvent>>,
}

impl AppState {
    /// Create a new AppState wired to a running engine task
    pub fn new(
        timer_config: Arc<TimerConfig>,
        command_tx: mpsc::Sender<TimerCommand>,
        snapshot_rx: watch::Receiver<TimerSnapshot>,
        host: String,
        port: u16,
    ) -> Self {
        Self {
            timer_config,
            command_tx,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_event: Mutex::new(None),
        }
    }

    /// Get the timer snapshot as last published by the engine
    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Forward a command to the engine task and record it as the last event
    pub async fn dispatch(&self, command: TimerCommand) -> Result<(), String> {
        let description = command.label();
        self.command_tx
            .send(command)
            .await
            .map_err(|e| format!("Timer engine unavailable: {}", e))?;
        self.record_event(description);
        Ok(())
    }

    /// Record the most recent accepted event
    pub fn record_event(&self, description: &str) {
        match self.last_event.lock() {
            Ok(mut last) => {
                *last = Some(LastEvent {
                    description: description.to_string(),
                    at: Utc::now(),
                });
            }
            Err(e) => warn!("Failed to lock last event tracking: {}", e),
        }
    }

    /// Get last event information
    pub fn last_event(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_event.lock() {
            Ok(last) => match last.as_ref() {
                Some(event) => (Some(event.description.clone()), Some(event.at)),
                None => (None, None),
            },
            Err(_) => (None, None),
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
