//! Room Timer - a countdown timer panel for interactive collaboration endpoints
//!
//! This library provides the timer state machine, the declarative panel
//! pages it publishes, and the overlay/alarm coordination that mirrors the
//! remaining time onto the device screen. The binary wires the engine to an
//! HTTP event intake and a logging device transport.

pub mod alarm;
pub mod api;
pub mod config;
pub mod device;
pub mod engine;
pub mod events;
pub mod overlay;
pub mod panel;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::{Config, TimerConfig};
pub use device::{Device, LogDevice};
pub use engine::TimerEngine;
pub use state::AppState;
pub use utils::signals::shutdown_signal;
