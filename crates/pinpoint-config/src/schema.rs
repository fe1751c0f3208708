//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

pub(crate) fn default_true() -> bool {
    true
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub styles: StyleConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How clicks are turned into locked selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// First click locks a primary element, later clicks accumulate secondaries.
    #[default]
    DualRole,
    /// First click locks the sole selection, later clicks are ignored.
    SingleLock,
}

impl SelectionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::DualRole => "dual-role",
            SelectionPolicy::SingleLock => "single-lock",
        }
    }
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dual-role" | "dual_role" | "dual" => Ok(SelectionPolicy::DualRole),
            "single-lock" | "single_lock" | "single" => Ok(SelectionPolicy::SingleLock),
            other => Err(format!(
                "unknown selection policy '{}', expected 'dual-role' or 'single-lock'",
                other
            )),
        }
    }
}

/// Overlay behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default)]
    pub policy: SelectionPolicy,

    /// Maximum characters of text content kept in a capture.
    #[serde(default = "default_text_limit")]
    pub text_limit: usize,

    /// Viewport cursor while annotation mode is active.
    #[serde(default = "default_cursor")]
    pub cursor: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            policy: SelectionPolicy::default(),
            text_limit: default_text_limit(),
            cursor: default_cursor(),
        }
    }
}

fn default_text_limit() -> usize {
    100
}

fn default_cursor() -> String {
    "crosshair".to_string()
}

/// Role classes and the injected stylesheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// `id` of the injected `<style>` element.
    #[serde(default = "default_style_id")]
    pub style_id: String,

    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,

    /// Sole selection under the single-lock policy.
    #[serde(default = "default_locked_class")]
    pub locked_class: String,

    #[serde(default = "default_primary_class")]
    pub primary_class: String,

    #[serde(default = "default_secondary_class")]
    pub secondary_class: String,

    #[serde(default = "default_highlight_color")]
    pub highlight_color: String,

    #[serde(default = "default_locked_color")]
    pub locked_color: String,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style_id: default_style_id(),
            highlight_class: default_highlight_class(),
            locked_class: default_locked_class(),
            primary_class: default_primary_class(),
            secondary_class: default_secondary_class(),
            highlight_color: default_highlight_color(),
            locked_color: default_locked_color(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
        }
    }
}

fn default_style_id() -> String {
    "pinpoint-overlay-style".to_string()
}

fn default_highlight_class() -> String {
    "pinpoint-highlight".to_string()
}

fn default_locked_class() -> String {
    "pinpoint-locked".to_string()
}

fn default_primary_class() -> String {
    "pinpoint-primary".to_string()
}

fn default_secondary_class() -> String {
    "pinpoint-secondary".to_string()
}

fn default_highlight_color() -> String {
    "#1e90ff".to_string()
}

fn default_locked_color() -> String {
    "#ff4500".to_string()
}

fn default_primary_color() -> String {
    "gold".to_string()
}

fn default_secondary_color() -> String {
    "#32cd32".to_string()
}

/// Selection notification endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base URL; events are sent to `<endpoint>/notify-<role>-selected`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: default_endpoint(),
        }
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

/// Logging output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    /// Directory for daily-rotated log files. Console only when unset.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            directory: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
