//! Logging device transport
//!
//! Stands in for a real room device by writing every directive to the log.
//! Lets the service run end-to-end with no hardware attached; panel
//! definitions are logged as JSON so the published UI can be inspected.

use tracing::info;

use crate::panel::PanelDefinition;

use super::{Device, DeviceError, PanelSummary};

/// Device transport that logs directives instead of sending them
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDevice;

impl LogDevice {
    pub fn new() -> Self {
        Self
    }
}

impl Device for LogDevice {
    async fn publish_page(&self, panel: &PanelDefinition) -> Result<(), DeviceError> {
        let json = serde_json::to_string(panel).map_err(|e| DeviceError::Rejected {
            directive: "publish_page",
            reason: e.to_string(),
        })?;
        info!("device: publish panel '{}': {}", panel.panel_id, json);
        Ok(())
    }

    async fn set_widget_value(&self, widget_id: &str, value: &str) -> Result<(), DeviceError> {
        info!("device: set widget '{}' = {:?}", widget_id, value);
        Ok(())
    }

    async fn clear_widget_value(&self, widget_id: &str) -> Result<(), DeviceError> {
        info!("device: unset widget '{}'", widget_id);
        Ok(())
    }

    async fn draw_overlay_text(&self, x: u32, y: u32, text: &str) -> Result<(), DeviceError> {
        info!("device: draw overlay text at ({}, {}): {:?}", x, y, text);
        Ok(())
    }

    async fn clear_overlay_text(&self) -> Result<(), DeviceError> {
        info!("device: clear overlay text");
        Ok(())
    }

    async fn draw_video_graphic(&self, text: &str) -> Result<(), DeviceError> {
        info!("device: draw video banner: {:?}", text);
        Ok(())
    }

    async fn clear_video_graphic(&self) -> Result<(), DeviceError> {
        info!("device: clear video banner");
        Ok(())
    }

    async fn play_alert_audio(&self, looped: bool) -> Result<(), DeviceError> {
        info!("device: play alert audio (looped: {})", looped);
        Ok(())
    }

    async fn stop_alert_audio(&self) -> Result<(), DeviceError> {
        info!("device: stop alert audio");
        Ok(())
    }

    async fn show_modal_alert(
        &self,
        title: &str,
        body: &str,
        duration_seconds: u32,
    ) -> Result<(), DeviceError> {
        info!(
            "device: show alert '{}' ({}, {}s)",
            title, body, duration_seconds
        );
        Ok(())
    }

    async fn close_panel(&self) -> Result<(), DeviceError> {
        info!("device: close panel page");
        Ok(())
    }

    async fn upload_icon(&self, icon_id: &str, image: &[u8]) -> Result<(), DeviceError> {
        info!("device: upload icon '{}' ({} bytes)", icon_id, image.len());
        Ok(())
    }

    async fn list_panels(&self, activity_type: &str) -> Result<Vec<PanelSummary>, DeviceError> {
        info!("device: list panels (activity type: {})", activity_type);
        Ok(Vec::new())
    }
}
