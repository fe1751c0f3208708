//! Annotation engine.
//!
//! Owns the session and routes every page event to the component that
//! handles it. Hosts call [`AnnotationEngine::dispatch`] from their listeners
//! and apply the returned [`EventDisposition`] to the native event.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use pinpoint_config::{Config, SelectionPolicy};
use pinpoint_protocols::{
    CapturedElement, Document, EventDisposition, ListenerKind, SelectionNotifier,
};

use crate::highlight::HighlightTracker;
use crate::locator::LocatorSynthesizer;
use crate::selection::SelectionMachine;
use crate::session::{AnnotationSession, SessionSnapshot};
use crate::styles::RoleClasses;
use crate::suppress::InputSuppressor;

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

pub struct AnnotationEngine<D: Document> {
    document: D,
    session: AnnotationSession<D::Node>,
    highlighter: HighlightTracker,
    selection: SelectionMachine,
    suppressor: InputSuppressor,
    cursor: String,
}

impl<D: Document> AnnotationEngine<D> {
    pub fn new(document: D, config: &Config, notifier: Arc<dyn SelectionNotifier>) -> Self {
        let classes = RoleClasses::from_config(&config.styles);
        debug!(
            policy = config.overlay.policy.as_str(),
            notifier = notifier.name(),
            "Creating annotation engine"
        );

        Self {
            document,
            session: AnnotationSession::new(),
            highlighter: HighlightTracker::new(classes.clone()),
            selection: SelectionMachine::new(
                config.overlay.policy,
                classes,
                LocatorSynthesizer::new(config.overlay.text_limit),
                notifier,
            ),
            suppressor: InputSuppressor,
            cursor: config.overlay.cursor.clone(),
        }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    pub fn session(&self) -> &AnnotationSession<D::Node> {
        &self.session
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.selection.policy()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Turn annotation mode on or off.
    ///
    /// Turning it off clears the highlight and unlocks every selection.
    pub fn set_mode(&mut self, enabled: bool) {
        self.session.set_mode(enabled);

        if enabled {
            self.document.set_viewport_cursor(Some(&self.cursor));
        } else {
            self.document.set_viewport_cursor(None);
            self.highlighter.clear(&self.document, &mut self.session);
            self.selection.unlock(&self.document, &mut self.session);
        }
        info!(enabled, "Annotation mode changed");
    }

    /// [`set_mode`](Self::set_mode) with a loosely typed flag.
    pub fn set_mode_value(&mut self, value: &Value) {
        self.set_mode(truthy(value));
    }

    /// Release all selections. Always returns `true`.
    pub fn unlock(&mut self) -> bool {
        self.selection.unlock(&self.document, &mut self.session)
    }

    /// Handle one page event on `target`.
    pub fn dispatch(&mut self, kind: ListenerKind, target: &D::Node) -> EventDisposition {
        match kind {
            ListenerKind::PointerEnter => {
                self.highlighter
                    .enter(&self.document, &mut self.session, target);
                EventDisposition::PASS
            }
            ListenerKind::PointerLeave => {
                self.highlighter
                    .leave(&self.document, &mut self.session, target);
                EventDisposition::PASS
            }
            _ if !self.session.is_active() => EventDisposition::PASS,
            ListenerKind::Click => {
                self.selection
                    .select(&self.document, &mut self.session, target);
                EventDisposition::SUPPRESS
            }
            ListenerKind::KeyDown => self.suppressor.key_down(&self.document, target),
            ListenerKind::PointerDown => self.suppressor.pointer_down(&self.document, target),
            ListenerKind::Change => self.suppressor.change(&self.document, target),
        }
    }

    /// Primary (or sole) capture.
    pub fn selected_element(&self) -> Option<&CapturedElement> {
        self.session.current_selection()
    }

    pub fn secondary_selections(&self) -> Vec<CapturedElement> {
        self.session.secondary_selections().cloned().collect()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }
}

/// JavaScript truthiness of a JSON value.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
