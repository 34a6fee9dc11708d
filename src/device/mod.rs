//! Device command layer
//!
//! Everything the timer shows on a room device goes through the [`Device`]
//! trait: panel publishing, widget updates, overlay drawing and alert
//! control. The engine stays generic over the transport so the service can
//! run against a logging transport or a recording one in tests.

pub mod console;
pub mod mock;

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::panel::PanelDefinition;

// Re-export main types
pub use console::LogDevice;
pub use mock::{DeviceCall, RecordingDevice};

/// Errors surfaced by a device transport
#[derive(Debug)]
pub enum DeviceError {
    /// The device rejected a directive
    Rejected {
        directive: &'static str,
        reason: String,
    },
    /// The transport to the device failed
    Io(std::io::Error),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::Rejected { directive, reason } => {
                write!(f, "device rejected {}: {}", directive, reason)
            }
            DeviceError::Io(e) => write!(f, "device transport error: {}", e),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeviceError::Io(e) => Some(e),
            DeviceError::Rejected { .. } => None,
        }
    }
}

impl From<std::io::Error> for DeviceError {
    fn from(e: std::io::Error) -> Self {
        DeviceError::Io(e)
    }
}

/// Panel registration entry returned by [`Device::list_panels`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSummary {
    pub panel_id: String,
    pub order: u32,
}

/// Outbound command surface of a room device.
///
/// Each method maps to a single directive. Implementations report failures
/// through [`DeviceError`]; the engine decides which directives are
/// best-effort. Returned futures are `Send` so the engine task can be
/// spawned onto the runtime.
pub trait Device: Send + Sync + 'static {
    /// Publish (create or replace) the timer panel
    fn publish_page(
        &self,
        panel: &PanelDefinition,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Set a widget to a display value
    fn set_widget_value(
        &self,
        widget_id: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Return a widget to its unset state
    fn clear_widget_value(
        &self,
        widget_id: &str,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Draw positioned text on the device's 10000x10000 overlay grid
    fn draw_overlay_text(
        &self,
        x: u32,
        y: u32,
        text: &str,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Clear positioned overlay text
    fn clear_overlay_text(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Draw the banner text along the bottom of the local video output
    fn draw_video_graphic(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Clear the video output banner
    fn clear_video_graphic(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Start the alert ringtone
    fn play_alert_audio(
        &self,
        looped: bool,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Stop the alert ringtone
    fn stop_alert_audio(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Show a modal alert that clears itself after the given duration
    fn show_modal_alert(
        &self,
        title: &str,
        body: &str,
        duration_seconds: u32,
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Close whichever panel page is currently open
    fn close_panel(&self) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// Upload a custom panel icon image
    fn upload_icon(
        &self,
        icon_id: &str,
        image: &[u8],
    ) -> impl Future<Output = Result<(), DeviceError>> + Send;

    /// List registered panels of one activity type
    fn list_panels(
        &self,
        activity_type: &str,
    ) -> impl Future<Output = Result<Vec<PanelSummary>, DeviceError>> + Send;
}
