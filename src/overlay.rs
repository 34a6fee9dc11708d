//! On-screen overlay rendering
//!
//! Mirrors the remaining time outside the panel: as a banner on the live
//! video output, as positioned text on the device's 3x3 grid, or not at
//! all. Changing location always clears whatever the previous location
//! drew, so stale text never lingers on screen. All device calls here are
//! best-effort; a failed draw is logged and retried naturally on the next
//! tick.

use tracing::warn;

use crate::config::LocalizedStrings;
use crate::device::Device;
use crate::state::{OverlayLocation, TimeStrings, TimerPhase};

/// Line break token understood by the positioned-text display layer
pub const LINE_BREAK: &str = "<br>";

/// Marker appended to the timer label while the countdown is paused
const PAUSE_MARKER: &str = " ⏸";

/// Redraw the overlay for the current location and remaining time
pub async fn refresh<D: Device>(
    device: &D,
    location: OverlayLocation,
    phase: TimerPhase,
    strings: &LocalizedStrings,
    time: &TimeStrings,
) {
    let marker = if phase == TimerPhase::Paused {
        PAUSE_MARKER
    } else {
        ""
    };

    match location {
        OverlayLocation::Bottom => {
            let label = format!("{}: {}{}", strings.timer_label, time.joined(), marker);
            clear_text(device).await;
            if let Err(e) = device.draw_video_graphic(&label).await {
                warn!("Failed to draw video banner: {}", e);
            }
        }
        OverlayLocation::None => {
            clear_text(device).await;
            clear_video(device).await;
        }
        positioned => {
            // grid_position is Some for every location left at this point
            let Some((x, y)) = positioned.grid_position() else {
                return;
            };
            let label = format!("{}{}\n{}", strings.timer_label, marker, time.joined());
            if let Err(e) = device.draw_overlay_text(x, y, &line_broken(&label)).await {
                warn!("Failed to draw positioned overlay text: {}", e);
            }
            clear_video(device).await;
        }
    }
}

/// Clear the mechanism used by the given location once the countdown expires
pub async fn clear_finished<D: Device>(device: &D, location: OverlayLocation) {
    match location {
        OverlayLocation::Bottom => clear_video(device).await,
        _ => clear_text(device).await,
    }
}

/// Clear both overlay mechanisms unconditionally
pub async fn clear_all<D: Device>(device: &D) {
    clear_text(device).await;
    clear_video(device).await;
}

async fn clear_text<D: Device>(device: &D) {
    if let Err(e) = device.clear_overlay_text().await {
        warn!("Failed to clear overlay text: {}", e);
    }
}

async fn clear_video<D: Device>(device: &D) {
    if let Err(e) = device.clear_video_graphic().await {
        warn!("Failed to clear video banner: {}", e);
    }
}

/// Replace every kind of line break with the display layer's token
fn line_broken(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK)
        .replace('\r', LINE_BREAK)
        .replace('\n', LINE_BREAK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceCall, RecordingDevice};

    fn strings() -> LocalizedStrings {
        LocalizedStrings::default()
    }

    fn time(seconds: u32) -> TimeStrings {
        TimeStrings::new(seconds, "m", "s")
    }

    #[tokio::test]
    async fn test_bottom_draws_banner_after_clearing_text() {
        let device = RecordingDevice::new();
        refresh(
            &device,
            OverlayLocation::Bottom,
            TimerPhase::Running,
            &strings(),
            &time(29),
        )
        .await;

        assert_eq!(
            device.calls(),
            vec![
                DeviceCall::ClearOverlayText,
                DeviceCall::DrawVideoGraphic {
                    text: "⌛ Timer: 00m 29s".to_string(),
                },
            ],
        );
    }

    #[tokio::test]
    async fn test_grid_position_draws_text_then_clears_banner() {
        let device = RecordingDevice::new();
        refresh(
            &device,
            OverlayLocation::TopLeft,
            TimerPhase::Running,
            &strings(),
            &time(605),
        )
        .await;

        assert_eq!(
            device.calls(),
            vec![
                DeviceCall::DrawOverlayText {
                    x: 1000,
                    y: 1000,
                    text: "⌛ Timer<br>10m 05s".to_string(),
                },
                DeviceCall::ClearVideoGraphic,
            ],
        );
    }

    #[tokio::test]
    async fn test_none_clears_both_mechanisms() {
        let device = RecordingDevice::new();
        refresh(
            &device,
            OverlayLocation::None,
            TimerPhase::Stopped,
            &strings(),
            &time(600),
        )
        .await;

        assert_eq!(
            device.calls(),
            vec![DeviceCall::ClearOverlayText, DeviceCall::ClearVideoGraphic],
        );
    }

    #[tokio::test]
    async fn test_pause_marker_appended_while_paused() {
        let device = RecordingDevice::new();
        refresh(
            &device,
            OverlayLocation::Bottom,
            TimerPhase::Paused,
            &strings(),
            &time(27),
        )
        .await;
        assert!(device.calls().contains(&DeviceCall::DrawVideoGraphic {
            text: "⌛ Timer: 00m 27s ⏸".to_string(),
        }));

        device.reset();
        refresh(
            &device,
            OverlayLocation::MiddleCenter,
            TimerPhase::Paused,
            &strings(),
            &time(27),
        )
        .await;
        assert!(device.calls().contains(&DeviceCall::DrawOverlayText {
            x: 5000,
            y: 5000,
            text: "⌛ Timer ⏸<br>00m 27s".to_string(),
        }));
    }

    #[tokio::test]
    async fn test_clear_finished_matches_location_mechanism() {
        let device = RecordingDevice::new();
        clear_finished(&device, OverlayLocation::Bottom).await;
        assert_eq!(device.calls(), vec![DeviceCall::ClearVideoGraphic]);

        device.reset();
        clear_finished(&device, OverlayLocation::TopRight).await;
        assert_eq!(device.calls(), vec![DeviceCall::ClearOverlayText]);

        device.reset();
        clear_finished(&device, OverlayLocation::None).await;
        assert_eq!(device.calls(), vec![DeviceCall::ClearOverlayText]);
    }

    #[tokio::test]
    async fn test_draw_failures_are_swallowed() {
        let device = RecordingDevice::new();
        device.fail_on("draw_video_graphic");
        device.fail_on("clear_overlay_text");
        refresh(
            &device,
            OverlayLocation::Bottom,
            TimerPhase::Running,
            &strings(),
            &time(10),
        )
        .await;
        // Both calls were still attempted in order
        assert_eq!(device.calls().len(), 2);
    }

    #[test]
    fn test_line_break_substitution() {
        assert_eq!(line_broken("a\nb"), "a<br>b");
        assert_eq!(line_broken("a\r\nb\rc"), "a<br>b<br>c");
        assert_eq!(line_broken("plain"), "plain");
    }
}
