//! Hover highlight.

use tracing::trace;

use pinpoint_protocols::Document;

use crate::session::AnnotationSession;
use crate::styles::RoleClasses;

/// Moves the highlight class to whatever the pointer is over.
#[derive(Debug, Clone)]
pub struct HighlightTracker {
    classes: RoleClasses,
}

impl HighlightTracker {
    pub fn new(classes: RoleClasses) -> Self {
        Self { classes }
    }

    pub fn enter<D: Document>(
        &self,
        document: &D,
        session: &mut AnnotationSession<D::Node>,
        target: &D::Node,
    ) {
        if !session.is_active() {
            return;
        }
        // Locked elements keep their role colour.
        if self
            .classes
            .locked_roles()
            .iter()
            .any(|class| document.has_class(target, class))
        {
            return;
        }

        if let Some(previous) = session.take_highlighted() {
            if &previous != target {
                document.remove_class(&previous, &self.classes.highlight);
            }
        }
        document.add_class(target, &self.classes.highlight);
        session.set_highlighted(Some(target.clone()));
        trace!(?target, "Highlight moved");
    }

    pub fn leave<D: Document>(
        &self,
        document: &D,
        session: &mut AnnotationSession<D::Node>,
        target: &D::Node,
    ) {
        if session.highlighted() == Some(target) {
            document.remove_class(target, &self.classes.highlight);
            session.set_highlighted(None);
        }
    }

    /// Drop the highlight entirely.
    pub fn clear<D: Document>(&self, document: &D, session: &mut AnnotationSession<D::Node>) {
        if let Some(previous) = session.take_highlighted() {
            document.remove_class(&previous, &self.classes.highlight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinpoint_dom_memory::{MemoryDocument, NodeId, PageFixture};

    fn setup() -> (MemoryDocument, Vec<NodeId>, HighlightTracker) {
        let doc = MemoryDocument::from_fixture(
            &PageFixture::new("body")
                .with_child(PageFixture::new("div"))
                .with_child(PageFixture::new("div"))
                .with_child(PageFixture::new("div").with_attr("class", "pinpoint-primary")),
        )
        .unwrap();
        let divs = doc.elements_by_tag("div");
        (doc, divs, HighlightTracker::new(RoleClasses::default()))
    }

    fn active() -> AnnotationSession<NodeId> {
        let mut session = AnnotationSession::new();
        session.set_mode(true);
        session
    }

    #[test]
    fn test_enter_inactive_is_noop() {
        let (doc, divs, tracker) = setup();
        let mut session = AnnotationSession::new();
        tracker.enter(&doc, &mut session, &divs[0]);
        assert!(doc.nodes_with_class("pinpoint-highlight").is_empty());
        assert!(session.highlighted().is_none());
    }

    #[test]
    fn test_enter_moves_highlight() {
        let (doc, divs, tracker) = setup();
        let mut session = active();

        tracker.enter(&doc, &mut session, &divs[0]);
        tracker.enter(&doc, &mut session, &divs[1]);
        assert_eq!(doc.nodes_with_class("pinpoint-highlight"), vec![divs[1]]);
        assert_eq!(session.highlighted(), Some(&divs[1]));

        // Re-entering the same element keeps it highlighted.
        tracker.enter(&doc, &mut session, &divs[1]);
        assert_eq!(doc.nodes_with_class("pinpoint-highlight"), vec![divs[1]]);
    }

    #[test]
    fn test_enter_locked_is_noop() {
        let (doc, divs, tracker) = setup();
        let mut session = active();

        tracker.enter(&doc, &mut session, &divs[0]);
        tracker.enter(&doc, &mut session, &divs[2]);
        assert!(!doc.has_class(&divs[2], "pinpoint-highlight"));
        assert_eq!(session.highlighted(), Some(&divs[0]));
    }

    #[test]
    fn test_leave() {
        let (doc, divs, tracker) = setup();
        let mut session = active();

        tracker.enter(&doc, &mut session, &divs[0]);
        tracker.leave(&doc, &mut session, &divs[1]);
        assert_eq!(session.highlighted(), Some(&divs[0]));

        tracker.leave(&doc, &mut session, &divs[0]);
        assert!(session.highlighted().is_none());
        assert!(doc.nodes_with_class("pinpoint-highlight").is_empty());
    }
}
