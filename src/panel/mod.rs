//! Panel model
//!
//! In-memory description of the timer panel and its pages as published to
//! the device. The builders in [`views`] produce one page per timer
//! situation; the engine wraps them in the panel envelope and sends them
//! through the device layer.

pub mod views;

use serde::Serialize;

// Re-export main types
pub use views::PageView;

/// Activity type the timer panel registers under
pub const ACTIVITY_TYPE: &str = "Custom";

/// Complete panel as published to the device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelDefinition {
    pub panel_id: String,
    /// Button label shown on the device home screen
    pub name: String,
    /// Custom icon the panel button carries
    pub icon_id: String,
    /// Position among other custom panels, preserved across republishes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    pub page: PageDefinition,
}

/// Single page of widgets inside the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageDefinition {
    /// Page id reported back by page-closed events, always the panel id
    pub page_id: String,
    pub title: String,
    pub rows: Vec<Row>,
    pub hide_row_names: bool,
}

impl PageDefinition {
    /// Ids of every widget on the page, in layout order
    pub fn widget_ids(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|row| row.widgets.iter())
            .map(|widget| widget.widget_id.as_str())
            .collect()
    }
}

/// Horizontal group of widgets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub widgets: Vec<Widget>,
}

impl Row {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self { widgets }
    }
}

/// Single interactive element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub widget_id: String,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

/// Widget variants used by the timer pages
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetKind {
    Button {
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        icon: Option<ButtonIcon>,
        size: u8,
    },
    GroupButton {
        size: u8,
        columns: u8,
        options: Vec<GroupOption>,
    },
    Text {
        value: String,
        size: u8,
    },
}

/// Built-in icons available for buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonIcon {
    Play,
    Pause,
    Stop,
    Back,
    List,
}

/// Selectable entry of a group button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupOption {
    pub key: String,
    pub label: String,
}

impl GroupOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Widget id scoped to a panel: `<panel_id>-<suffix>`
pub fn widget_id(panel_id: &str, suffix: &str) -> String {
    format!("{}-{}", panel_id, suffix)
}

/// Id of the time readout widget shown on the main and countdown pages
pub fn time_text_id(panel_id: &str) -> String {
    widget_id(panel_id, "timerText")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_id_format() {
        assert_eq!(widget_id("timer", "start"), "timer-start");
        assert_eq!(widget_id("room-a-timer", "preset-seconds"), "room-a-timer-preset-seconds");
        assert_eq!(time_text_id("timer"), "timer-timerText");
    }

    #[test]
    fn test_widget_serialization_is_tagged() {
        let widget = Widget {
            widget_id: "timer-start".to_string(),
            kind: WidgetKind::Button {
                label: None,
                icon: Some(ButtonIcon::Play),
                size: 1,
            },
        };
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["widget_id"], "timer-start");
        assert_eq!(json["type"], "button");
        assert_eq!(json["icon"], "play");
        assert!(json.get("label").is_none());
    }
}
