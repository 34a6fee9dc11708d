//! Timer engine task
//!
//! Single task owning the timer state machine. Commands arrive over an
//! mpsc channel, the 1-second tick and the alarm timeout are deadlines
//! polled by the same select loop, and a [`TimerSnapshot`] is published on
//! a watch channel after every handled command, tick or timeout so the
//! HTTP layer (and tests) always see the latest state. Leaving the running
//! phase clears the tick deadline before the operation returns, so at most
//! one tick schedule is ever live.


use std::future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Duration, Instant};
use tracing::{debug, error, info, warn};

use crate::alarm::AlarmController;
use crate::config::TimerConfig;
use crate::device::Device;
use crate::events::{AdjustDirection, PageRequest, TimerCommand};
use crate::overlay;
use crate::panel::{self, views, PageView};
use crate::state::{OverlayLocation, TimeStrings, TimerPhase, TimerSnapshot, TimerState};

/// Interval between countdown ticks
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The timer state machine and its device-facing coordinator
pub struct TimerEngine<D: Device> {
    device: D,
    config: Arc<TimerConfig>,
    state: TimerState,
    /// When the next tick fires; None while not running
    next_tick: Option<Instant>,
    alarm: AlarmController,
    snapshot_tx: watch::Sender<TimerSnapshot>,
}

impl<D: Device> TimerEngine<D> {
    /// Create an engine and the snapshot channel it publishes on
    pub fn new(device: D, config: Arc<TimerConfig>) -> (Self, watch::Receiver<TimerSnapshot>) {
        let state = TimerState::new(config.default_seconds);
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::of(&state, false));
        let engine = Self {
            device,
            config,
            state,
            next_tick: None,
            alarm: AlarmController::new(),
            snapshot_tx,
        };
        (engine, snapshot_rx)
    }

    /// Run the engine until a shutdown command arrives or the channel closes
    pub async fn run(mut self, mut commands: mpsc::Receiver<TimerCommand>) {
        info!("Starting timer engine for panel '{}'", self.config.panel_id);
        self.initialize().await;
        self.publish_snapshot();

        loop {
            let tick_at = self.next_tick;
            let alarm_at = self.alarm.deadline();

            tokio::select! {
                command = commands.recv() => {
                    match command {
                        Some(command) => {
                            if !self.handle_command(command).await {
                                break;
                            }
                        }
                        None => {
                            debug!("Command channel closed");
                            break;
                        }
                    }
                }
                _ = sleep_until_or_pending(tick_at) => {
                    self.next_tick = tick_at.map(|at| at + TICK_PERIOD);
                    self.tick().await;
                }
                _ = sleep_until_or_pending(alarm_at) => {
                    debug!("Alarm display duration elapsed");
                    self.alarm.deactivate(&self.device).await;
                }
            }

            self.publish_snapshot();
        }

        self.teardown().await;
        self.publish_snapshot();
        info!("Timer engine stopped");
    }

    /// Dispatch one command; returns false when the engine should exit
    async fn handle_command(&mut self, command: TimerCommand) -> bool {
        debug!("Handling command: {}", command.label());
        match command {
            TimerCommand::Start => self.start().await,
            TimerCommand::Pause => self.pause().await,
            TimerCommand::Stop => self.stop(false).await,
            TimerCommand::Clear => self.clear().await,
            TimerCommand::Adjust {
                direction,
                amount_seconds,
                widget_id,
            } => self.adjust(direction, amount_seconds, &widget_id).await,
            TimerCommand::ApplyPreset { seconds } => self.apply_preset(seconds).await,
            TimerCommand::SetOverlayLocation {
                location,
                widget_id,
            } => self.set_overlay_location(location, &widget_id).await,
            TimerCommand::ShowPage(request) => self.show_page(request).await,
            TimerCommand::PanelOpened => self.refresh_ui().await,
            TimerCommand::PageClosed => self.page_closed().await,
            TimerCommand::DismissAlarm => self.alarm.deactivate(&self.device).await,
            TimerCommand::Shutdown => return false,
        }
        true
    }

    /// Upload the panel icon (when configured) and publish the main page
    async fn initialize(&mut self) {
        if let Some(path) = &self.config.icon_path {
            match std::fs::read(path) {
                Ok(image) => {
                    if let Err(e) = self.device.upload_icon(&self.config.panel_id, &image).await {
                        warn!("Failed to upload panel icon: {}", e);
                    }
                }
                Err(e) => warn!("Unable to read panel icon {}: {}", path.display(), e),
            }
        }
        self.publish_panel(PageView::Main).await;
    }

    /// Cancel schedules and take the timer's artifacts off the screen
    async fn teardown(&mut self) {
        self.next_tick = None;
        self.alarm.deactivate(&self.device).await;
        overlay::clear_all(&self.device).await;
    }

    async fn start(&mut self) {
        if self.state.remaining_seconds == 0 {
            debug!("Ignoring start with nothing on the clock");
            return;
        }
        if self.state.phase == TimerPhase::Running {
            debug!("Ignoring start while already running");
            return;
        }

        info!("Starting timer at {}s", self.state.remaining_seconds);
        self.state.phase = TimerPhase::Running;
        // The running page must exist before the countdown begins
        self.publish_panel(PageView::Countdown(TimerPhase::Running)).await;
        self.tick().await;
        self.next_tick = Some(Instant::now() + TICK_PERIOD);
    }

    async fn pause(&mut self) {
        if self.state.phase != TimerPhase::Running {
            debug!("Ignoring pause while not running");
            return;
        }

        info!("Pausing timer at {}s", self.state.remaining_seconds);
        self.next_tick = None;
        self.state.phase = TimerPhase::Paused;
        self.publish_panel(PageView::Countdown(TimerPhase::Paused)).await;
        self.refresh_ui().await;
    }

    async fn stop(&mut self, finished: bool) {
        info!("Stopping timer (finished: {})", finished);
        self.next_tick = None;
        if finished {
            overlay::clear_finished(&self.device, self.state.overlay_location).await;
        }
        self.state.remaining_seconds = self.config.default_seconds;
        self.state.phase = TimerPhase::Stopped;
        self.publish_panel(PageView::Main).await;
        if !finished {
            self.refresh_ui().await;
        }
    }

    async fn clear(&mut self) {
        self.state.remaining_seconds = 0;
        self.refresh_ui().await;
    }

    async fn adjust(&mut self, direction: AdjustDirection, amount: u32, widget_id: &str) {
        // Return the group button to its unselected look
        if let Err(e) = self.device.clear_widget_value(widget_id).await {
            debug!("Failed to reset adjustment widget: {}", e);
        }

        self.state.remaining_seconds = match direction {
            AdjustDirection::Increment => self.state.remaining_seconds.saturating_add(amount),
            AdjustDirection::Decrement => self.state.remaining_seconds.saturating_sub(amount),
        };
        self.refresh_ui().await;
    }

    async fn apply_preset(&mut self, seconds: u32) {
        info!("Applying preset: {}s", seconds);
        self.state.remaining_seconds = seconds;
        self.publish_panel(PageView::Main).await;
        self.refresh_ui().await;
    }

    async fn set_overlay_location(&mut self, location: OverlayLocation, widget_id: &str) {
        if self.state.overlay_location == location {
            // Selecting the active location again hides the overlay
            self.state.overlay_location = OverlayLocation::None;
            if let Err(e) = self.device.clear_widget_value(widget_id).await {
                debug!("Failed to reset location selector: {}", e);
            }
        } else {
            self.state.overlay_location = location;
        }
        info!("Overlay location: {}", self.state.overlay_location.key());
        self.refresh_ui().await;
    }

    async fn show_page(&mut self, request: PageRequest) {
        let view = match request {
            PageRequest::Presets => PageView::Presets,
            PageRequest::Settings => PageView::Settings,
            // "Back" returns to whichever page matches the current phase
            PageRequest::Main => match self.state.phase {
                TimerPhase::Stopped => PageView::Main,
                phase => PageView::Countdown(phase),
            },
        };
        self.publish_panel(view).await;
    }

    async fn page_closed(&mut self) {
        match self.state.phase {
            TimerPhase::Stopped => {
                // Closing the idle editor resets it entirely
                self.state.remaining_seconds = self.config.default_seconds;
                overlay::clear_all(&self.device).await;
                self.publish_panel(PageView::Main).await;
            }
            phase => self.publish_panel(PageView::Countdown(phase)).await,
        }
    }

    async fn tick(&mut self) {
        if self.state.remaining_seconds == 0 {
            info!("Countdown expired");
            self.stop(true).await;
            if let Err(e) = self.device.close_panel().await {
                warn!("Failed to close panel page: {}", e);
            }
            self.alarm.activate(&self.device, &self.config.strings).await;
            return;
        }
        self.state.remaining_seconds -= 1;
        self.refresh_ui().await;
    }

    /// Update the time readout widget and redraw the overlay
    async fn refresh_ui(&self) {
        let time = self.time_strings();
        let readout = panel::time_text_id(&self.config.panel_id);
        // The readout widget only exists on some pages, so failures here
        // are expected and stay quiet
        if let Err(e) = self.device.set_widget_value(&readout, &time.joined()).await {
            debug!("Time readout update skipped: {}", e);
        }

        overlay::refresh(
            &self.device,
            self.state.overlay_location,
            self.state.phase,
            &self.config.strings,
            &time,
        )
        .await;
    }

    /// Publish a page, preserving the panel's position among other panels
    async fn publish_panel(&self, view: PageView) {
        let order = self.existing_order().await;
        let page = views::page(&self.config, view, &self.time_strings());
        let definition = views::panel(&self.config, order, page);
        if let Err(e) = self.device.publish_page(&definition).await {
            error!("Failed to publish panel page: {}", e);
        }

        match view {
            // The readout carries its value in the page itself; drop any
            // stale widget value left over from a previous page
            PageView::Main => {
                if let Err(e) = self
                    .device
                    .clear_widget_value(&panel::time_text_id(&self.config.panel_id))
                    .await
                {
                    debug!("Failed to reset time readout: {}", e);
                }
            }
            // Pre-select the current location on the settings page
            PageView::Settings => {
                let selector = panel::widget_id(&self.config.panel_id, "location");
                let result = match self.state.overlay_location {
                    OverlayLocation::None => self.device.clear_widget_value(&selector).await,
                    location => self.device.set_widget_value(&selector, location.key()).await,
                };
                if let Err(e) = result {
                    debug!("Failed to preset location selector: {}", e);
                }
            }
            _ => {}
        }
    }

    /// Read back this panel's published order, if it is already registered
    async fn existing_order(&self) -> Option<u32> {
        match self.device.list_panels(panel::ACTIVITY_TYPE).await {
            Ok(panels) => panels
                .into_iter()
                .find(|summary| summary.panel_id == self.config.panel_id)
                .map(|summary| summary.order),
            Err(e) => {
                warn!("Panel order lookup failed: {}", e);
                None
            }
        }
    }

    fn time_strings(&self) -> TimeStrings {
        TimeStrings::new(
            self.state.remaining_seconds,
            &self.config.strings.minute_suffix,
            &self.config.strings.second_suffix,
        )
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx
            .send_replace(TimerSnapshot::of(&self.state, self.alarm.is_active()));
    }
}

/// Sleep until the deadline, or forever when there is none
async fn sleep_until_or_pending(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => future::pending().await,
    }
}
