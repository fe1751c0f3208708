//! Click-to-lock selection.
//!
//! Two policies share the same mechanics. Under [`SelectionPolicy::SingleLock`]
//! the first click locks the sole selection and every later click is ignored
//! until unlock. Under [`SelectionPolicy::DualRole`] the first click locks the
//! primary and each later click on a fresh element appends a secondary.
//!
//! A qualifying click moves the element from the highlight class to its role
//! class, captures it, stores the capture in the session and fires one
//! notification. The notifier is a port; nothing it does can change the
//! session.

use std::sync::Arc;

use tracing::{debug, info};

use pinpoint_config::SelectionPolicy;
use pinpoint_protocols::{CapturedElement, Document, SelectionEvent, SelectionNotifier};

use crate::locator::LocatorSynthesizer;
use crate::session::AnnotationSession;
use crate::styles::RoleClasses;

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;

pub struct SelectionMachine {
    policy: SelectionPolicy,
    classes: RoleClasses,
    locator: LocatorSynthesizer,
    notifier: Arc<dyn SelectionNotifier>,
}

impl SelectionMachine {
    pub fn new(
        policy: SelectionPolicy,
        classes: RoleClasses,
        locator: LocatorSynthesizer,
        notifier: Arc<dyn SelectionNotifier>,
    ) -> Self {
        Self {
            policy,
            classes,
            locator,
            notifier,
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Handle a click on `target`. Returns the event fired, or `None` when
    /// the click did not qualify.
    pub fn select<D: Document>(
        &self,
        document: &D,
        session: &mut AnnotationSession<D::Node>,
        target: &D::Node,
    ) -> Option<SelectionEvent> {
        match self.policy {
            SelectionPolicy::SingleLock => {
                if session.is_locked() {
                    debug!("Element already locked, ignoring click");
                    return None;
                }
                let capture = self.mark(document, session, target, &self.classes.locked);
                session.lock_primary(target.clone(), capture.clone());
                Some(self.announce(SelectionEvent::ElementSelected, capture))
            }
            SelectionPolicy::DualRole => {
                if !session.is_locked() {
                    let capture = self.mark(document, session, target, &self.classes.primary);
                    session.lock_primary(target.clone(), capture.clone());
                    return Some(self.announce(SelectionEvent::PrimarySelected, capture));
                }

                if session.is_primary(target)
                    || session.is_secondary(target)
                    || document.has_class(target, &self.classes.primary)
                    || document.has_class(target, &self.classes.secondary)
                {
                    debug!("Element already selected, ignoring click");
                    return None;
                }

                let capture = self.mark(document, session, target, &self.classes.secondary);
                session.push_secondary(target.clone(), capture.clone());
                Some(self.announce(SelectionEvent::SecondarySelected, capture))
            }
        }
    }

    /// Strip every role class and clear the lock. Always returns `true`.
    pub fn unlock<D: Document>(
        &self,
        document: &D,
        session: &mut AnnotationSession<D::Node>,
    ) -> bool {
        let was_locked = session.is_locked();
        let (primary, secondaries) = session.release();

        if let Some(primary) = primary {
            document.remove_class(&primary, self.classes.lead(self.policy));
        }
        for node in &secondaries {
            document.remove_class(node, &self.classes.secondary);
        }

        if was_locked {
            info!(secondaries = secondaries.len(), "Selection unlocked");
        }
        true
    }

    fn mark<D: Document>(
        &self,
        document: &D,
        session: &mut AnnotationSession<D::Node>,
        target: &D::Node,
        class: &str,
    ) -> CapturedElement {
        document.remove_class(target, &self.classes.highlight);
        if session.highlighted() == Some(target) {
            session.set_highlighted(None);
        }
        document.add_class(target, class);
        self.locator.capture(document, target)
    }

    fn announce(&self, event: SelectionEvent, capture: CapturedElement) -> SelectionEvent {
        info!(
            event = %event,
            tag = %capture.tag_name,
            xpath = capture.xpath.as_deref().unwrap_or("N/A"),
            "Captured {}",
            capture.summary()
        );
        self.notifier.notify(event, &capture);
        event
    }
}
