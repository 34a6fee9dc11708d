//! Page builders for each timer situation

use crate::config::TimerConfig;
use crate::state::{OverlayLocation, TimeStrings, TimerPhase};

use super::{
    time_text_id, widget_id, ButtonIcon, GroupOption, PageDefinition, PanelDefinition, Row,
    Widget, WidgetKind,
};

/// Adjustment steps offered by the increment and decrement groups
pub const ADJUST_STEPS: [(u32, &str); 4] = [(600, "10m"), (60, "1m"), (10, "10s"), (1, "1s")];

/// Page variants the engine can publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageView {
    Main,
    Presets,
    Settings,
    /// Compact transport page shown while running or paused
    Countdown(TimerPhase),
}

/// Build the page for a view
pub fn page(config: &TimerConfig, view: PageView, time: &TimeStrings) -> PageDefinition {
    match view {
        PageView::Main => main_page(config, time),
        PageView::Presets => presets_page(config),
        PageView::Settings => settings_page(config),
        PageView::Countdown(phase) => countdown_page(config, phase, time),
    }
}

/// Wrap a page in the panel envelope
pub fn panel(config: &TimerConfig, order: Option<u32>, page: PageDefinition) -> PanelDefinition {
    PanelDefinition {
        panel_id: config.panel_id.clone(),
        name: config.strings.button_label.clone(),
        icon_id: config.panel_id.clone(),
        order,
        page,
    }
}

/// Main page: adjustment groups around the time readout, plus transport,
/// presets and settings controls
pub fn main_page(config: &TimerConfig, time: &TimeStrings) -> PageDefinition {
    let panel_id = &config.panel_id;

    let mut bottom_row = vec![button(panel_id, "clear", Some("⟲"), None, 1)];
    if !config.presets.is_empty() {
        bottom_row.push(button(
            panel_id,
            "presets",
            Some(&config.strings.presets_button),
            None,
            2,
        ));
    }

    PageDefinition {
        page_id: panel_id.clone(),
        title: config.strings.button_label.clone(),
        rows: vec![
            Row::new(vec![adjust_group(panel_id, "increment", '+')]),
            Row::new(vec![time_text(panel_id, time)]),
            Row::new(vec![adjust_group(panel_id, "decrement", '-')]),
            Row::new(bottom_row),
            Row::new(vec![
                button(panel_id, "settings", None, Some(ButtonIcon::List), 1),
                button(panel_id, "start", None, Some(ButtonIcon::Play), 1),
            ]),
        ],
        hide_row_names: true,
    }
}

/// Presets page: one group per configured preset category
pub fn presets_page(config: &TimerConfig) -> PageDefinition {
    let panel_id = &config.panel_id;
    let mut widgets = Vec::new();

    if !config.presets.seconds.is_empty() {
        let options = config
            .presets
            .seconds
            .iter()
            .map(|s| GroupOption::new(s.to_string(), format!("{}{}", s, config.strings.second_suffix)))
            .collect();
        widgets.push(group(panel_id, "preset-seconds", 4, options));
    }
    if !config.presets.minutes.is_empty() {
        let options = config
            .presets
            .minutes
            .iter()
            .map(|m| GroupOption::new(m.to_string(), format!("{}{}", m, config.strings.minute_suffix)))
            .collect();
        widgets.push(group(panel_id, "preset-minutes", 4, options));
    }
    if !config.presets.minutes_seconds.is_empty() {
        let options = config
            .presets
            .minutes_seconds
            .iter()
            .map(|ms| GroupOption::new(ms.clone(), ms.clone()))
            .collect();
        widgets.push(group(panel_id, "preset-minutesSeconds", 4, options));
    }

    widgets.push(button(panel_id, "main", None, Some(ButtonIcon::Back), 1));

    PageDefinition {
        page_id: panel_id.clone(),
        title: config.strings.presets_title.clone(),
        rows: vec![Row::new(widgets)],
        hide_row_names: true,
    }
}

/// Settings page: overlay location selector laid out as a 3-column grid
pub fn settings_page(config: &TimerConfig) -> PageDefinition {
    let panel_id = &config.panel_id;
    let options = OverlayLocation::selectable()
        .iter()
        .map(|location| GroupOption::new(location.key(), ""))
        .collect();

    PageDefinition {
        page_id: panel_id.clone(),
        title: config.strings.location_title.clone(),
        rows: vec![
            Row::new(vec![group(panel_id, "location", 3, options)]),
            Row::new(vec![button(panel_id, "main", None, Some(ButtonIcon::Back), 1)]),
        ],
        hide_row_names: true,
    }
}

/// Countdown page shown while the timer is running or paused
pub fn countdown_page(
    config: &TimerConfig,
    phase: TimerPhase,
    time: &TimeStrings,
) -> PageDefinition {
    let panel_id = &config.panel_id;
    let toggle = if phase == TimerPhase::Running {
        button(panel_id, "pause", None, Some(ButtonIcon::Pause), 1)
    } else {
        button(panel_id, "start", None, Some(ButtonIcon::Play), 1)
    };

    PageDefinition {
        page_id: panel_id.clone(),
        title: config.strings.button_label.clone(),
        rows: vec![
            Row::new(vec![time_text(panel_id, time)]),
            Row::new(vec![
                button(panel_id, "settings", None, Some(ButtonIcon::List), 1),
                toggle,
                button(panel_id, "stop", None, Some(ButtonIcon::Stop), 1),
            ]),
        ],
        hide_row_names: true,
    }
}

fn button(
    panel_id: &str,
    suffix: &str,
    label: Option<&str>,
    icon: Option<ButtonIcon>,
    size: u8,
) -> Widget {
    Widget {
        widget_id: widget_id(panel_id, suffix),
        kind: WidgetKind::Button {
            label: label.map(str::to_string),
            icon,
            size,
        },
    }
}

fn group(panel_id: &str, suffix: &str, columns: u8, options: Vec<GroupOption>) -> Widget {
    Widget {
        widget_id: widget_id(panel_id, suffix),
        kind: WidgetKind::GroupButton {
            size: 4,
            columns,
            options,
        },
    }
}

fn adjust_group(panel_id: &str, suffix: &str, sign: char) -> Widget {
    let options = ADJUST_STEPS
        .iter()
        .map(|(seconds, label)| GroupOption::new(seconds.to_string(), format!("{}{}", sign, label)))
        .collect();
    group(panel_id, suffix, 4, options)
}

fn time_text(panel_id: &str, time: &TimeStrings) -> Widget {
    Widget {
        widget_id: time_text_id(panel_id),
        kind: WidgetKind::Text {
            value: time.joined(),
            size: 4,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time() -> TimeStrings {
        TimeStrings::new(600, "m", "s")
    }

    fn config_with_presets() -> TimerConfig {
        let mut config = TimerConfig::default();
        config.presets.seconds = vec![15, 30];
        config.presets.minutes = vec![1, 5];
        config.presets.minutes_seconds = vec!["1:20".to_string(), "2:40".to_string()];
        config
    }

    #[test]
    fn test_main_page_inventory() {
        let page = main_page(&config_with_presets(), &time());
        assert_eq!(
            page.widget_ids(),
            vec![
                "timer-increment",
                "timer-timerText",
                "timer-decrement",
                "timer-clear",
                "timer-presets",
                "timer-settings",
                "timer-start",
            ],
        );
        assert_eq!(page.page_id, "timer");
        assert_eq!(page.title, "Timer");
        assert!(page.hide_row_names);
    }

    #[test]
    fn test_main_page_omits_presets_button_when_unconfigured() {
        let page = main_page(&TimerConfig::default(), &time());
        assert!(!page.widget_ids().contains(&"timer-presets"));
    }

    #[test]
    fn test_adjust_groups_share_steps() {
        let page = main_page(&TimerConfig::default(), &time());
        let labels: Vec<_> = page
            .rows
            .iter()
            .flat_map(|row| row.widgets.iter())
            .filter_map(|widget| match &widget.kind {
                WidgetKind::GroupButton { options, .. } => Some(
                    options
                        .iter()
                        .map(|option| option.label.clone())
                        .collect::<Vec<_>>(),
                ),
                _ => None,
            })
            .collect();
        assert_eq!(labels[0], vec!["+10m", "+1m", "+10s", "+1s"]);
        assert_eq!(labels[1], vec!["-10m", "-1m", "-10s", "-1s"]);

        // Option keys carry the step in seconds
        if let WidgetKind::GroupButton { options, .. } = &page.rows[0].widgets[0].kind {
            let keys: Vec<_> = options.iter().map(|option| option.key.as_str()).collect();
            assert_eq!(keys, vec!["600", "60", "10", "1"]);
        } else {
            panic!("increment row should hold a group button");
        }
    }

    #[test]
    fn test_presets_page_categories() {
        let page = presets_page(&config_with_presets());
        assert_eq!(
            page.widget_ids(),
            vec![
                "timer-preset-seconds",
                "timer-preset-minutes",
                "timer-preset-minutesSeconds",
                "timer-main",
            ],
        );
        assert_eq!(page.title, "Select Preset");

        let labels: Vec<Vec<String>> = page.rows[0]
            .widgets
            .iter()
            .filter_map(|widget| match &widget.kind {
                WidgetKind::GroupButton { options, .. } => {
                    Some(options.iter().map(|option| option.label.clone()).collect())
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels[0], vec!["15s", "30s"]);
        assert_eq!(labels[1], vec!["1m", "5m"]);
        assert_eq!(labels[2], vec!["1:20", "2:40"]);
    }

    #[test]
    fn test_presets_page_skips_empty_categories() {
        let mut config = TimerConfig::default();
        config.presets.minutes = vec![5];
        let page = presets_page(&config);
        assert_eq!(page.widget_ids(), vec!["timer-preset-minutes", "timer-main"]);
    }

    #[test]
    fn test_settings_page_location_selector() {
        let page = settings_page(&TimerConfig::default());
        assert_eq!(page.widget_ids(), vec!["timer-location", "timer-main"]);
        assert_eq!(page.title, "Location");

        match &page.rows[0].widgets[0].kind {
            WidgetKind::GroupButton { columns, options, .. } => {
                assert_eq!(*columns, 3);
                let keys: Vec<_> = options.iter().map(|option| option.key.as_str()).collect();
                let expected: Vec<_> = OverlayLocation::selectable()
                    .iter()
                    .map(|location| location.key())
                    .collect();
                assert_eq!(keys, expected);
                assert!(options.iter().all(|option| option.label.is_empty()));
            }
            other => panic!("location selector should be a group button, got {:?}", other),
        }
    }

    #[test]
    fn test_countdown_page_toggle_follows_phase() {
        let config = TimerConfig::default();

        let running = countdown_page(&config, TimerPhase::Running, &time());
        assert_eq!(
            running.widget_ids(),
            vec!["timer-timerText", "timer-settings", "timer-pause", "timer-stop"],
        );

        let paused = countdown_page(&config, TimerPhase::Paused, &time());
        assert_eq!(
            paused.widget_ids(),
            vec!["timer-timerText", "timer-settings", "timer-start", "timer-stop"],
        );
    }

    #[test]
    fn test_time_readout_value() {
        let page = countdown_page(&TimerConfig::default(), TimerPhase::Running, &time());
        match &page.rows[0].widgets[0].kind {
            WidgetKind::Text { value, .. } => assert_eq!(value, "10m 00s"),
            other => panic!("readout should be a text widget, got {:?}", other),
        }
    }

    #[test]
    fn test_panel_envelope() {
        let config = TimerConfig::default();
        let wrapped = panel(&config, Some(3), settings_page(&config));
        assert_eq!(wrapped.panel_id, "timer");
        assert_eq!(wrapped.name, "Timer");
        assert_eq!(wrapped.icon_id, "timer");
        assert_eq!(wrapped.order, Some(3));
    }
}
