//! Configuration and CLI argument handling

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "room-timer")]
#[command(about = "A countdown timer panel service for interactive collaboration endpoints")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20661")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Path to a JSON timer configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

/// Preset durations offered on the presets page, grouped by unit style
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Presets {
    pub seconds: Vec<u32>,
    pub minutes: Vec<u32>,
    /// "M:SS" entries, e.g. "2:40"
    pub minutes_seconds: Vec<String>,
}

impl Presets {
    /// Check whether every preset category is empty
    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty() && self.minutes.is_empty() && self.minutes_seconds.is_empty()
    }
}

/// Display strings, each falling back to a built-in English default when absent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalizedStrings {
    pub button_label: String,
    pub presets_button: String,
    pub presets_title: String,
    pub location_title: String,
    pub timer_label: String,
    pub minute_suffix: String,
    pub second_suffix: String,
    pub alarm_title: String,
    pub alarm_body: String,
}

impl Default for LocalizedStrings {
    fn default() -> Self {
        Self {
            button_label: "Timer".to_string(),
            presets_button: "Presets".to_string(),
            presets_title: "Select Preset".to_string(),
            location_title: "Location".to_string(),
            timer_label: "⌛ Timer".to_string(),
            minute_suffix: "m".to_string(),
            second_suffix: "s".to_string(),
            alarm_title: "⏰ Times Up!".to_string(),
            alarm_body: "Press Dismiss To Stop Alarm".to_string(),
        }
    }
}

/// Timer panel configuration, loaded once at startup and read-only afterwards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TimerConfig {
    /// Stable identifier namespacing all widget ids and the overlay target
    pub panel_id: String,

    /// Countdown value restored whenever the timer is stopped or the panel resets
    pub default_seconds: u32,

    pub presets: Presets,

    #[serde(rename = "localizedStrings")]
    pub strings: LocalizedStrings,

    /// Optional panel icon image uploaded during initialization
    pub icon_path: Option<PathBuf>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            panel_id: "timer".to_string(),
            default_seconds: 600,
            presets: Presets::default(),
            strings: LocalizedStrings::default(),
            icon_path: None,
        }
    }
}

impl TimerConfig {
    /// Load the timer configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config.validated())
    }

    /// Drop preset entries that cannot be parsed so the panel never offers them
    fn validated(mut self) -> Self {
        self.presets.minutes_seconds.retain(|entry| {
            if parse_minutes_seconds(entry).is_some() {
                true
            } else {
                warn!("Ignoring unparseable minutesSeconds preset: {:?}", entry);
                false
            }
        });
        self
    }
}

/// Parse an "M:SS" duration into whole seconds ("2:40" -> 160)
pub fn parse_minutes_seconds(value: &str) -> Option<u32> {
    let (minutes, seconds) = value.split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.panel_id, "timer");
        assert_eq!(config.default_seconds, 600);
        assert!(config.presets.is_empty());
        assert_eq!(config.strings.button_label, "Timer");
        assert_eq!(config.strings.minute_suffix, "m");
        assert_eq!(config.strings.second_suffix, "s");
        assert!(config.icon_path.is_none());
    }

    #[test]
    fn test_partial_file_falls_back_per_field() {
        let config: TimerConfig = serde_json::from_str(
            r#"{"panelId":"kitchen","localizedStrings":{"buttonLabel":"Kitchen Timer"}}"#,
        )
        .unwrap();
        assert_eq!(config.panel_id, "kitchen");
        assert_eq!(config.default_seconds, 600);
        assert_eq!(config.strings.button_label, "Kitchen Timer");
        assert_eq!(config.strings.presets_title, "Select Preset");
    }

    #[test]
    fn test_preset_schema_keys() {
        let config: TimerConfig = serde_json::from_str(
            r#"{"presets":{"seconds":[15,30],"minutes":[1,5],"minutesSeconds":["1:20","2:40"]}}"#,
        )
        .unwrap();
        assert_eq!(config.presets.seconds, vec![15, 30]);
        assert_eq!(config.presets.minutes, vec![1, 5]);
        assert_eq!(config.presets.minutes_seconds, vec!["1:20", "2:40"]);
        assert!(!config.presets.is_empty());
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_minutes_seconds("2:40"), Some(160));
        assert_eq!(parse_minutes_seconds("1:05"), Some(65));
        assert_eq!(parse_minutes_seconds("0:59"), Some(59));
        assert_eq!(parse_minutes_seconds("10:00"), Some(600));
        assert_eq!(parse_minutes_seconds("240"), None);
        assert_eq!(parse_minutes_seconds("a:b"), None);
        assert_eq!(parse_minutes_seconds(""), None);
    }

    #[test]
    fn test_validation_drops_unparseable_presets() {
        let config: TimerConfig = serde_json::from_str(
            r#"{"presets":{"minutesSeconds":["1:20","soon","2:40"]}}"#,
        )
        .unwrap();
        let config = config.validated();
        assert_eq!(config.presets.minutes_seconds, vec!["1:20", "2:40"]);
    }
}
