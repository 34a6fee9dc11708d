//! Core timer state types shared between the engine task and the API layer

use serde::Serialize;

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Stopped,
    Running,
    Paused,
}

impl TimerPhase {
    /// Phase name as used in logs and page ids
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerPhase::Stopped => "stopped",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
        }
    }
}

/// On-screen placement of the countdown overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlayLocation {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Device-managed banner along the bottom edge
    Bottom,
    /// Overlay hidden entirely
    None,
}

impl OverlayLocation {
    /// Widget option key for the location selector
    pub fn key(&self) -> &'static str {
        match self {
            OverlayLocation::TopLeft => "topLeft",
            OverlayLocation::TopCenter => "topCenter",
            OverlayLocation::TopRight => "topRight",
            OverlayLocation::MiddleLeft => "middleLeft",
            OverlayLocation::MiddleCenter => "middleCenter",
            OverlayLocation::MiddleRight => "middleRight",
            OverlayLocation::BottomLeft => "bottomLeft",
            OverlayLocation::BottomCenter => "bottomCenter",
            OverlayLocation::BottomRight => "bottomRight",
            OverlayLocation::Bottom => "bottom",
            OverlayLocation::None => "none",
        }
    }

    /// Parse a location selector option key
    pub fn from_key(key: &str) -> Option<Self> {
        let location = match key {
            "topLeft" => OverlayLocation::TopLeft,
            "topCenter" => OverlayLocation::TopCenter,
            "topRight" => OverlayLocation::TopRight,
            "middleLeft" => OverlayLocation::MiddleLeft,
            "middleCenter" => OverlayLocation::MiddleCenter,
            "middleRight" => OverlayLocation::MiddleRight,
            "bottomLeft" => OverlayLocation::BottomLeft,
            "bottomCenter" => OverlayLocation::BottomCenter,
            "bottomRight" => OverlayLocation::BottomRight,
            "bottom" => OverlayLocation::Bottom,
            "none" => OverlayLocation::None,
            _ => return None,
        };
        Some(location)
    }

    /// All positions selectable from the settings page, in display order
    pub fn selectable() -> [Self; 10] {
        [
            OverlayLocation::TopLeft,
            OverlayLocation::TopCenter,
            OverlayLocation::TopRight,
            OverlayLocation::MiddleLeft,
            OverlayLocation::MiddleCenter,
            OverlayLocation::MiddleRight,
            OverlayLocation::BottomLeft,
            OverlayLocation::BottomCenter,
            OverlayLocation::BottomRight,
            OverlayLocation::Bottom,
        ]
    }

    /// Screen coordinates for positioned text, on the device's 10000x10000 grid.
    /// Returns None for the banner and hidden placements, which are not positioned.
    pub fn grid_position(&self) -> Option<(u32, u32)> {
        let position = match self {
            OverlayLocation::TopLeft => (1000, 1000),
            OverlayLocation::TopCenter => (5000, 1000),
            OverlayLocation::TopRight => (9000, 1000),
            OverlayLocation::MiddleLeft => (1000, 5000),
            OverlayLocation::MiddleCenter => (5000, 5000),
            OverlayLocation::MiddleRight => (9000, 5000),
            OverlayLocation::BottomLeft => (1000, 9000),
            OverlayLocation::BottomCenter => (5000, 9000),
            OverlayLocation::BottomRight => (9000, 9000),
            OverlayLocation::Bottom | OverlayLocation::None => return None,
        };
        Some(position)
    }
}

impl Default for OverlayLocation {
    fn default() -> Self {
        OverlayLocation::Bottom
    }
}

/// Mutable timer state, owned exclusively by the engine task
#[derive(Debug, Clone)]
pub struct TimerState {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub overlay_location: OverlayLocation,
}

impl TimerState {
    /// Create a stopped timer holding the configured default countdown
    pub fn new(default_seconds: u32) -> Self {
        Self {
            phase: TimerPhase::Stopped,
            remaining_seconds: default_seconds,
            overlay_location: OverlayLocation::default(),
        }
    }
}

/// Read-only view of the timer, published to API clients after every engine step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub remaining_seconds: u32,
    pub overlay_location: OverlayLocation,
    pub alarm_active: bool,
}

impl TimerSnapshot {
    /// Snapshot of a timer state plus the current alarm flag
    pub fn of(state: &TimerState, alarm_active: bool) -> Self {
        Self {
            phase: state.phase,
            remaining_seconds: state.remaining_seconds,
            overlay_location: state.overlay_location,
            alarm_active,
        }
    }
}

/// Zero-padded minute and second display strings, e.g. "10m" / "05s"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeStrings {
    pub minutes: String,
    pub seconds: String,
}

impl TimeStrings {
    /// Split a total second count into suffixed minute/second strings
    pub fn new(total_seconds: u32, minute_suffix: &str, second_suffix: &str) -> Self {
        Self {
            minutes: format!("{:02}{}", total_seconds / 60, minute_suffix),
            seconds: format!("{:02}{}", total_seconds % 60, second_suffix),
        }
    }

    /// Single-line form used for the panel time readout
    pub fn joined(&self) -> String {
        format!("{} {}", self.minutes, self.seconds)
    }
}
