//! Recording device transport
//!
//! No-hardware device that remembers every directive it receives, used by
//! the engine tests to assert on the exact sequence of UI commands.

use std::sync::{Arc, Mutex};

use crate::panel::PanelDefinition;

use super::{Device, DeviceError, PanelSummary};

/// One recorded directive
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    PublishPage(PanelDefinition),
    SetWidgetValue { widget_id: String, value: String },
    ClearWidgetValue { widget_id: String },
    DrawOverlayText { x: u32, y: u32, text: String },
    ClearOverlayText,
    DrawVideoGraphic { text: String },
    ClearVideoGraphic,
    PlayAlertAudio { looped: bool },
    StopAlertAudio,
    ShowModalAlert { title: String, body: String, duration_seconds: u32 },
    ClosePanel,
    UploadIcon { icon_id: String, bytes: usize },
    ListPanels { activity_type: String },
}

/// Device that records directives for assertions instead of acting on them
#[derive(Debug, Clone, Default)]
pub struct RecordingDevice {
    calls: Arc<Mutex<Vec<DeviceCall>>>,
    panels: Arc<Mutex<Vec<PanelSummary>>>,
    failing: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-register the panels reported by [`Device::list_panels`]
    pub fn with_panels(panels: Vec<PanelSummary>) -> Self {
        let device = Self::new();
        if let Ok(mut registered) = device.panels.lock() {
            *registered = panels;
        }
        device
    }

    /// Make every future call to the named directive fail
    pub fn fail_on(&self, directive: &'static str) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.push(directive);
        }
    }

    /// Snapshot of all recorded calls, in order
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Panels published so far, in order
    pub fn published_pages(&self) -> Vec<PanelDefinition> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                DeviceCall::PublishPage(panel) => Some(panel),
                _ => None,
            })
            .collect()
    }

    /// Forget all recorded calls
    pub fn reset(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: DeviceCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn check(&self, directive: &'static str) -> Result<(), DeviceError> {
        let failing = self
            .failing
            .lock()
            .map(|failing| failing.contains(&directive))
            .unwrap_or(false);
        if failing {
            return Err(DeviceError::Rejected {
                directive,
                reason: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Device for RecordingDevice {
    async fn publish_page(&self, panel: &PanelDefinition) -> Result<(), DeviceError> {
        self.record(DeviceCall::PublishPage(panel.clone()));
        self.check("publish_page")
    }

    async fn set_widget_value(&self, widget_id: &str, value: &str) -> Result<(), DeviceError> {
        self.record(DeviceCall::SetWidgetValue {
            widget_id: widget_id.to_string(),
            value: value.to_string(),
        });
        self.check("set_widget_value")
    }

    async fn clear_widget_value(&self, widget_id: &str) -> Result<(), DeviceError> {
        self.record(DeviceCall::ClearWidgetValue {
            widget_id: widget_id.to_string(),
        });
        self.check("clear_widget_value")
    }

    async fn draw_overlay_text(&self, x: u32, y: u32, text: &str) -> Result<(), DeviceError> {
        self.record(DeviceCall::DrawOverlayText {
            x,
            y,
            text: text.to_string(),
        });
        self.check("draw_overlay_text")
    }

    async fn clear_overlay_text(&self) -> Result<(), DeviceError> {
        self.record(DeviceCall::ClearOverlayText);
        self.check("clear_overlay_text")
    }

    async fn draw_video_graphic(&self, text: &str) -> Result<(), DeviceError> {
        self.record(DeviceCall::DrawVideoGraphic {
            text: text.to_string(),
        });
        self.check("draw_video_graphic")
    }

    async fn clear_video_graphic(&self) -> Result<(), DeviceError> {
        self.record(DeviceCall::ClearVideoGraphic);
        self.check("clear_video_graphic")
    }

    async fn play_alert_audio(&self, looped: bool) -> Result<(), DeviceError> {
        self.record(DeviceCall::PlayAlertAudio { looped });
        self.check("play_alert_audio")
    }

    async fn stop_alert_audio(&self) -> Result<(), DeviceError> {
        self.record(DeviceCall::StopAlertAudio);
        self.check("stop_alert_audio")
    }

    async fn show_modal_alert(
        &self,
        title: &str,
        body: &str,
        duration_seconds: u32,
    ) -> Result<(), DeviceError> {
        self.record(DeviceCall::ShowModalAlert {
            title: title.to_string(),
            body: body.to_string(),
            duration_seconds,
        });
        self.check("show_modal_alert")
    }

    async fn close_panel(&self) -> Result<(), DeviceError> {
        self.record(DeviceCall::ClosePanel);
        self.check("close_panel")
    }

    async fn upload_icon(&self, icon_id: &str, image: &[u8]) -> Result<(), DeviceError> {
        self.record(DeviceCall::UploadIcon {
            icon_id: icon_id.to_string(),
            bytes: image.len(),
        });
        self.check("upload_icon")
    }

    async fn list_panels(&self, activity_type: &str) -> Result<Vec<PanelSummary>, DeviceError> {
        self.record(DeviceCall::ListPanels {
            activity_type: activity_type.to_string(),
        });
        self.check("list_panels")?;
        Ok(self
            .panels
            .lock()
            .map(|panels| panels.clone())
            .unwrap_or_default())
    }
}
