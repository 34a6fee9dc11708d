//! Expiry alarm control
//!
//! When the countdown reaches zero the device plays a looping ringtone and
//! shows a modal alert. The alert clears itself after a fixed duration; the
//! ringtone keeps going until either that timeout fires or the user
//! dismisses the alert. The controller owns the timeout deadline and the
//! engine polls it, so leaving and re-entering the alarm re-arms the
//! timeout instead of letting a stale one cut a newer alarm short.

use tokio::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::LocalizedStrings;
use crate::device::Device;

/// How long the modal alert stays on screen before the alarm self-dismisses
pub const ALERT_DURATION_SECS: u32 = 8;

/// Tracks whether the expiry alarm is sounding and when it times out
#[derive(Debug, Default)]
pub struct AlarmController {
    active: bool,
    deadline: Option<Instant>,
}

impl AlarmController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the alarm is currently sounding
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// When the alarm should self-dismiss, while active
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Start the ringtone and show the modal alert
    pub async fn activate<D: Device>(&mut self, device: &D, strings: &LocalizedStrings) {
        info!("Activating alarm");
        self.active = true;
        self.deadline = Some(Instant::now() + Duration::from_secs(ALERT_DURATION_SECS as u64));

        if let Err(e) = device.play_alert_audio(true).await {
            warn!("Failed to start alert audio: {}", e);
        }
        if let Err(e) = device
            .show_modal_alert(&strings.alarm_title, &strings.alarm_body, ALERT_DURATION_SECS)
            .await
        {
            warn!("Failed to display alarm alert: {}", e);
        }
    }

    /// Stop the ringtone. Safe to call when the alarm is already inactive.
    pub async fn deactivate<D: Device>(&mut self, device: &D) {
        if !self.active {
            debug!("Alarm already inactive, nothing to dismiss");
            return;
        }
        info!("Deactivating alarm");
        self.active = false;
        self.deadline = None;

        if let Err(e) = device.stop_alert_audio().await {
            warn!("Failed to stop alert audio: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceCall, RecordingDevice};

    #[tokio::test]
    async fn test_activate_plays_audio_and_shows_alert() {
        let device = RecordingDevice::new();
        let mut alarm = AlarmController::new();

        alarm.activate(&device, &LocalizedStrings::default()).await;

        assert!(alarm.is_active());
        assert!(alarm.deadline().is_some());
        assert_eq!(
            device.calls(),
            vec![
                DeviceCall::PlayAlertAudio { looped: true },
                DeviceCall::ShowModalAlert {
                    title: "⏰ Times Up!".to_string(),
                    body: "Press Dismiss To Stop Alarm".to_string(),
                    duration_seconds: 8,
                },
            ],
        );
    }

    #[tokio::test]
    async fn test_deactivate_stops_audio_exactly_once() {
        let device = RecordingDevice::new();
        let mut alarm = AlarmController::new();

        alarm.activate(&device, &LocalizedStrings::default()).await;
        device.reset();

        alarm.deactivate(&device).await;
        alarm.deactivate(&device).await;

        assert!(!alarm.is_active());
        assert!(alarm.deadline().is_none());
        assert_eq!(device.calls(), vec![DeviceCall::StopAlertAudio]);
    }

    #[tokio::test]
    async fn test_deactivate_when_never_activated_is_a_noop() {
        let device = RecordingDevice::new();
        let mut alarm = AlarmController::new();

        alarm.deactivate(&device).await;

        assert!(device.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reactivation_rearms_the_deadline() {
        let device = RecordingDevice::new();
        let mut alarm = AlarmController::new();
        let strings = LocalizedStrings::default();

        alarm.activate(&device, &strings).await;
        let first = alarm.deadline().unwrap();

        alarm.deactivate(&device).await;
        tokio::time::advance(Duration::from_secs(5)).await;
        alarm.activate(&device, &strings).await;

        assert!(alarm.deadline().unwrap() > first);
    }
}
