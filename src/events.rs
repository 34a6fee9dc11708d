//! UI event intake and routing
//!
//! Turns the raw widget events reported by the device into typed commands
//! for the engine task. Widget ids follow the `<panelId>-<action>[-<option>]`
//! grammar, so events for other panels and unknown widgets decode to `None`
//! and are dropped at the boundary.

use serde::Deserialize;

use crate::config::{parse_minutes_seconds, TimerConfig};
use crate::state::OverlayLocation;

/// UI event as reported by the device event feed
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum UiEvent {
    /// A widget was pressed, released or clicked
    #[serde(rename_all = "camelCase")]
    WidgetAction {
        widget_id: String,
        #[serde(rename = "type")]
        kind: WidgetActionKind,
        #[serde(default)]
        value: Option<String>,
    },
    /// An extensions page was closed
    #[serde(rename_all = "camelCase")]
    PageClosed { page_id: String },
    /// The panel button was tapped on the home screen
    #[serde(rename_all = "camelCase")]
    PanelClicked { panel_id: String },
    /// A modal alert was dismissed
    AlertCleared,
}

/// Interaction kind carried by a widget action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetActionKind {
    Pressed,
    Released,
    Clicked,
}

/// Widget action parsed from a `<panelId>-<action>[-<option>]` id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Start,
    Stop,
    Clear,
    Pause,
    Presets,
    Settings,
    Main,
    Increment,
    Decrement,
    Location,
    Preset(PresetUnit),
}

/// Unit style of a preset group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetUnit {
    Seconds,
    Minutes,
    MinutesSeconds,
}

impl PresetUnit {
    /// Widget id option naming this preset group
    pub fn option(&self) -> &'static str {
        match self {
            PresetUnit::Seconds => "seconds",
            PresetUnit::Minutes => "minutes",
            PresetUnit::MinutesSeconds => "minutesSeconds",
        }
    }
}

impl PanelAction {
    /// Parse a widget id scoped to the given panel.
    ///
    /// The panel id itself may contain hyphens, so the prefix is stripped
    /// before the action and option parts are split.
    pub fn parse(widget_id: &str, panel_id: &str) -> Option<Self> {
        let rest = widget_id.strip_prefix(panel_id)?.strip_prefix('-')?;
        let (action, option) = match rest.split_once('-') {
            Some((action, option)) => (action, Some(option)),
            None => (rest, None),
        };

        let action = match (action, option) {
            ("start", None) => PanelAction::Start,
            ("stop", None) => PanelAction::Stop,
            ("clear", None) => PanelAction::Clear,
            ("pause", None) => PanelAction::Pause,
            ("presets", None) => PanelAction::Presets,
            ("settings", None) => PanelAction::Settings,
            ("main", None) => PanelAction::Main,
            ("increment", None) => PanelAction::Increment,
            ("decrement", None) => PanelAction::Decrement,
            ("location", None) => PanelAction::Location,
            ("preset", Some("seconds")) => PanelAction::Preset(PresetUnit::Seconds),
            ("preset", Some("minutes")) => PanelAction::Preset(PresetUnit::Minutes),
            ("preset", Some("minutesSeconds")) => PanelAction::Preset(PresetUnit::MinutesSeconds),
            _ => return None,
        };
        Some(action)
    }
}

/// Direction of a duration adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustDirection {
    Increment,
    Decrement,
}

/// Page variants reachable from navigation buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Main,
    Presets,
    Settings,
}

/// Commands accepted by the engine task
#[derive(Debug, Clone, PartialEq)]
pub enum TimerCommand {
    Start,
    Pause,
    Stop,
    Clear,
    Adjust {
        direction: AdjustDirection,
        amount_seconds: u32,
        widget_id: String,
    },
    ApplyPreset {
        seconds: u32,
    },
    SetOverlayLocation {
        location: OverlayLocation,
        widget_id: String,
    },
    ShowPage(PageRequest),
    PanelOpened,
    PageClosed,
    DismissAlarm,
    Shutdown,
}

impl TimerCommand {
    /// Short name for status reporting and logs
    pub fn label(&self) -> &'static str {
        match self {
            TimerCommand::Start => "start",
            TimerCommand::Pause => "pause",
            TimerCommand::Stop => "stop",
            TimerCommand::Clear => "clear",
            TimerCommand::Adjust {
                direction: AdjustDirection::Increment,
                ..
            } => "increment",
            TimerCommand::Adjust {
                direction: AdjustDirection::Decrement,
                ..
            } => "decrement",
            TimerCommand::ApplyPreset { .. } => "preset",
            TimerCommand::SetOverlayLocation { .. } => "location",
            TimerCommand::ShowPage(PageRequest::Main) => "page-main",
            TimerCommand::ShowPage(PageRequest::Presets) => "page-presets",
            TimerCommand::ShowPage(PageRequest::Settings) => "page-settings",
            TimerCommand::PanelOpened => "panel-opened",
            TimerCommand::PageClosed => "page-closed",
            TimerCommand::DismissAlarm => "dismiss-alarm",
            TimerCommand::Shutdown => "shutdown",
        }
    }
}

/// Map a UI event to an engine command, if it concerns the timer panel
pub fn decode(event: &UiEvent, config: &TimerConfig) -> Option<TimerCommand> {
    match event {
        UiEvent::WidgetAction {
            widget_id,
            kind,
            value,
        } => {
            let action = PanelAction::parse(widget_id, &config.panel_id)?;
            decode_widget_action(action, *kind, value.as_deref(), widget_id)
        }
        UiEvent::PageClosed { page_id } => {
            (page_id == &config.panel_id).then_some(TimerCommand::PageClosed)
        }
        UiEvent::PanelClicked { panel_id } => {
            (panel_id == &config.panel_id).then_some(TimerCommand::PanelOpened)
        }
        UiEvent::AlertCleared => Some(TimerCommand::DismissAlarm),
    }
}

fn decode_widget_action(
    action: PanelAction,
    kind: WidgetActionKind,
    value: Option<&str>,
    widget_id: &str,
) -> Option<TimerCommand> {
    match (kind, action) {
        (WidgetActionKind::Clicked, PanelAction::Start) => Some(TimerCommand::Start),
        (WidgetActionKind::Clicked, PanelAction::Stop) => Some(TimerCommand::Stop),
        (WidgetActionKind::Clicked, PanelAction::Clear) => Some(TimerCommand::Clear),
        (WidgetActionKind::Clicked, PanelAction::Pause) => Some(TimerCommand::Pause),
        (WidgetActionKind::Clicked, PanelAction::Presets) => {
            Some(TimerCommand::ShowPage(PageRequest::Presets))
        }
        (WidgetActionKind::Clicked, PanelAction::Settings) => {
            Some(TimerCommand::ShowPage(PageRequest::Settings))
        }
        (WidgetActionKind::Clicked, PanelAction::Main) => {
            Some(TimerCommand::ShowPage(PageRequest::Main))
        }
        (WidgetActionKind::Released, PanelAction::Increment) => Some(TimerCommand::Adjust {
            direction: AdjustDirection::Increment,
            amount_seconds: value?.trim().parse().ok()?,
            widget_id: widget_id.to_string(),
        }),
        (WidgetActionKind::Released, PanelAction::Decrement) => Some(TimerCommand::Adjust {
            direction: AdjustDirection::Decrement,
            amount_seconds: value?.trim().parse().ok()?,
            widget_id: widget_id.to_string(),
        }),
        (WidgetActionKind::Released, PanelAction::Location) => {
            Some(TimerCommand::SetOverlayLocation {
                location: OverlayLocation::from_key(value?)?,
                widget_id: widget_id.to_string(),
            })
        }
        (WidgetActionKind::Released, PanelAction::Preset(unit)) => {
            Some(TimerCommand::ApplyPreset {
                seconds: parse_preset_value(unit, value?)?,
            })
        }
        _ => None,
    }
}

/// Interpret a preset group value according to its unit style
fn parse_preset_value(unit: PresetUnit, value: &str) -> Option<u32> {
    match unit {
        PresetUnit::Seconds => value.trim().parse().ok(),
        PresetUnit::Minutes => value.trim().parse::<u32>().ok()?.checked_mul(60),
        PresetUnit::MinutesSeconds => parse_minutes_seconds(value),
    }
}
