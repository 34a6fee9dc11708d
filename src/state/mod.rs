//! State management module
//!
//! This module contains the timer state types shared between the engine
//! task and the HTTP API layer.

pub mod app_state;
pub mod timer;

// Re-export main types
pub use app_state::{AppState, LastEvent};
pub use timer::{OverlayLocation, TimeStrings, TimerPhase, TimerSnapshot, TimerState};
