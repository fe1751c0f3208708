//! Outbound selection notifications.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capture::CapturedElement;

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;

/// Role-specific selection event sent to the external listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionEvent {
    /// Sole selection under the single-lock policy.
    ElementSelected,
    PrimarySelected,
    SecondarySelected,
}

impl SelectionEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionEvent::ElementSelected => "element-selected",
            SelectionEvent::PrimarySelected => "primary-selected",
            SelectionEvent::SecondarySelected => "secondary-selected",
        }
    }

    /// Endpoint URL for this event under `base` (e.g. `http://127.0.0.1:8080/api`).
    pub fn endpoint(self, base: &str) -> String {
        format!("{}/notify-{}", base.trim_end_matches('/'), self.as_str())
    }
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port through which the engine announces a selection.
///
/// Delivery is fire-and-forget: implementations must return immediately,
/// must not panic, and swallow every failure. The engine never learns whether
/// the listener received anything.
pub trait SelectionNotifier: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn notify(&self, event: SelectionEvent, capture: &CapturedElement);
}
