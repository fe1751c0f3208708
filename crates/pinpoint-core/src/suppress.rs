//! Input suppression while annotating.

use tracing::trace;

use pinpoint_protocols::{ControlKind, Document, EventDisposition};

/// Decides which page interactions to cancel. Callers only consult it while
/// annotation mode is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSuppressor;

impl InputSuppressor {
    /// Typing into text inputs, textareas and editable regions.
    pub fn key_down<D: Document>(&self, document: &D, target: &D::Node) -> EventDisposition {
        if document.control_kind(target).accepts_text() {
            trace!(?target, "Suppressed keydown");
            EventDisposition::SUPPRESS
        } else {
            EventDisposition::PASS
        }
    }

    /// Opening a dropdown.
    pub fn pointer_down<D: Document>(&self, document: &D, target: &D::Node) -> EventDisposition {
        if document.control_kind(target) == ControlKind::Select {
            trace!(?target, "Suppressed dropdown");
            EventDisposition::SUPPRESS
        } else {
            EventDisposition::PASS
        }
    }

    /// Committed form changes, on any element.
    pub fn change<D: Document>(&self, _document: &D, target: &D::Node) -> EventDisposition {
        trace!(?target, "Suppressed change");
        EventDisposition::SUPPRESS
    }
}
