//! Annotation session state.

use serde::Serialize;

use pinpoint_protocols::CapturedElement;

/// Mutable state of one annotation session.
///
/// Secondary captures and their live elements are stored as pairs, so the
/// two views handed out by [`secondary_selections`](Self::secondary_selections)
/// and [`secondary_elements`](Self::secondary_elements) always have the same
/// length and order.
#[derive(Debug, Clone)]
pub struct AnnotationSession<N> {
    mode: bool,
    locked: bool,
    current_highlighted: Option<N>,
    locked_primary: Option<N>,
    current_selection: Option<CapturedElement>,
    secondaries: Vec<(CapturedElement, N)>,
}

impl<N> Default for AnnotationSession<N> {
    fn default() -> Self {
        Self {
            mode: false,
            locked: false,
            current_highlighted: None,
            locked_primary: None,
            current_selection: None,
            secondaries: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq> AnnotationSession<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether annotation mode is active.
    pub fn is_active(&self) -> bool {
        self.mode
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn highlighted(&self) -> Option<&N> {
        self.current_highlighted.as_ref()
    }

    /// Primary (dual-role) or sole (single-lock) element.
    pub fn locked_primary(&self) -> Option<&N> {
        self.locked_primary.as_ref()
    }

    pub fn current_selection(&self) -> Option<&CapturedElement> {
        self.current_selection.as_ref()
    }

    pub fn secondary_selections(&self) -> impl Iterator<Item = &CapturedElement> {
        self.secondaries.iter().map(|(capture, _)| capture)
    }

    pub fn secondary_elements(&self) -> impl Iterator<Item = &N> {
        self.secondaries.iter().map(|(_, node)| node)
    }

    pub fn secondary_count(&self) -> usize {
        self.secondaries.len()
    }

    pub fn is_primary(&self, node: &N) -> bool {
        self.locked_primary.as_ref() == Some(node)
    }

    pub fn is_secondary(&self, node: &N) -> bool {
        self.secondaries.iter().any(|(_, n)| n == node)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            locked: self.locked,
            current_selection: self.current_selection.clone(),
            secondary_selections: self.secondary_selections().cloned().collect(),
        }
    }

    pub(crate) fn set_mode(&mut self, mode: bool) {
        self.mode = mode;
    }

    pub(crate) fn set_highlighted(&mut self, node: Option<N>) {
        self.current_highlighted = node;
    }

    pub(crate) fn take_highlighted(&mut self) -> Option<N> {
        self.current_highlighted.take()
    }

    pub(crate) fn lock_primary(&mut self, node: N, capture: CapturedElement) {
        self.locked = true;
        self.locked_primary = Some(node);
        self.current_selection = Some(capture);
    }

    pub(crate) fn push_secondary(&mut self, node: N, capture: CapturedElement) {
        self.secondaries.push((capture, node));
    }

    /// Clear the lock and hand back every element that carried a role class.
    pub(crate) fn release(&mut self) -> (Option<N>, Vec<N>) {
        self.locked = false;
        self.current_selection = None;
        let primary = self.locked_primary.take();
        let secondaries = self.secondaries.drain(..).map(|(_, node)| node).collect();
        (primary, secondaries)
    }
}

/// Serializable view of the session for consumers outside the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub mode: bool,
    pub locked: bool,
    pub current_selection: Option<CapturedElement>,
    pub secondary_selections: Vec<CapturedElement>,
}
