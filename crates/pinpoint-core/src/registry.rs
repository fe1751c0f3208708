//! Listener registration table.
//!
//! Holds at most one handle per [`ListenerKind`]. Registering a kind that is
//! already present hands back the old handle so the caller can detach it.

use std::collections::HashMap;

use pinpoint_protocols::ListenerKind;

/// Registration table keyed by listener kind.
#[derive(Debug)]
pub struct ListenerRegistry<H> {
    handles: HashMap<ListenerKind, H>,
}

impl<H> ListenerRegistry<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Store `handle` for `kind`, returning the handle it replaces.
    pub fn replace(&mut self, kind: ListenerKind, handle: H) -> Option<H> {
        self.handles.insert(kind, handle)
    }

    /// Remove and return the handle for `kind`.
    pub fn take(&mut self, kind: ListenerKind) -> Option<H> {
        self.handles.remove(&kind)
    }

    pub fn get(&self, kind: ListenerKind) -> Option<&H> {
        self.handles.get(&kind)
    }

    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.handles.contains_key(&kind)
    }

    /// Registered kinds in installation order.
    pub fn kinds(&self) -> Vec<ListenerKind> {
        ListenerKind::ALL
            .into_iter()
            .filter(|kind| self.handles.contains_key(kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Remove every entry, in installation order.
    pub fn drain(&mut self) -> Vec<(ListenerKind, H)> {
        ListenerKind::ALL
            .into_iter()
            .filter_map(|kind| self.handles.remove(&kind).map(|h| (kind, h)))
            .collect()
    }
}

impl<H> Default for ListenerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
