//! Listener kinds and dispatch outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;

/// The six page listeners the overlay installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    PointerEnter,
    PointerLeave,
    Click,
    KeyDown,
    PointerDown,
    Change,
}

impl ListenerKind {
    /// Installation order.
    pub const ALL: [ListenerKind; 6] = [
        ListenerKind::PointerEnter,
        ListenerKind::PointerLeave,
        ListenerKind::Click,
        ListenerKind::KeyDown,
        ListenerKind::PointerDown,
        ListenerKind::Change,
    ];

    /// DOM event type the listener is registered for.
    ///
    /// Hover tracking uses the bubbling `mouseover`/`mouseout` pair so one
    /// document-level listener sees every element.
    pub fn dom_event(self) -> &'static str {
        match self {
            ListenerKind::PointerEnter => "mouseover",
            ListenerKind::PointerLeave => "mouseout",
            ListenerKind::Click => "click",
            ListenerKind::KeyDown => "keydown",
            ListenerKind::PointerDown => "mousedown",
            ListenerKind::Change => "change",
        }
    }

    /// Whether the listener runs in the capture phase, ahead of the target's
    /// own handlers.
    pub fn capture_phase(self) -> bool {
        !matches!(self, ListenerKind::PointerEnter | ListenerKind::PointerLeave)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListenerKind::PointerEnter => "pointer_enter",
            ListenerKind::PointerLeave => "pointer_leave",
            ListenerKind::Click => "click",
            ListenerKind::KeyDown => "key_down",
            ListenerKind::PointerDown => "pointer_down",
            ListenerKind::Change => "change",
        }
    }
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the host must do with the DOM event after the engine handled it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventDisposition {
    /// Let the page handle the event normally.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Cancel the default action and stop propagation.
    pub const SUPPRESS: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };

    pub fn is_suppressed(&self) -> bool {
        self.prevent_default && self.stop_propagation
    }
}
