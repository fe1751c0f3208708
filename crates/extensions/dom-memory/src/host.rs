//! Listener bookkeeping for the in-memory page.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use pinpoint_protocols::{EventHost, ListenerKind, OverlayError};

/// Records attached listeners so tests and replays can assert there is
/// never more than one per kind.
///
/// The host stands for the page, not for one script instance: it also keeps
/// the page-level table of the most recently registered listener per kind,
/// which a later installation uses to detach listeners it has no handle for.
#[derive(Debug, Default)]
pub struct MemoryEventHost {
    next_handle: AtomicU64,
    listeners: Mutex<HashMap<ListenerKind, Vec<u64>>>,
    registered: Mutex<HashMap<ListenerKind, u64>>,
    failing: Mutex<HashSet<ListenerKind>>,
}

impl MemoryEventHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `attach` of `kind` fail.
    pub fn fail_on(&self, kind: ListenerKind) {
        self.failing.lock().insert(kind);
    }

    /// Undo [`fail_on`](Self::fail_on).
    pub fn allow(&self, kind: ListenerKind) {
        self.failing.lock().remove(&kind);
    }

    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners.lock().get(&kind).map_or(0, Vec::len)
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.lock().values().map(Vec::len).sum()
    }
}

impl EventHost for MemoryEventHost {
    type Handle = u64;

    fn attach(&self, kind: ListenerKind) -> Result<u64, OverlayError> {
        if self.failing.lock().contains(&kind) {
            return Err(OverlayError::ListenerAttach {
                kind,
                message: "host refused listener".to_string(),
            });
        }

        let handle = self.next_handle.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().entry(kind).or_default().push(handle);
        self.registered.lock().insert(kind, handle);
        trace!("Attached {} listener #{}", kind, handle);
        Ok(handle)
    }

    fn detach(&self, kind: ListenerKind, handle: u64) {
        let mut listeners = self.listeners.lock();
        if let Some(handles) = listeners.get_mut(&kind) {
            handles.retain(|h| *h != handle);
        }
        let mut registered = self.registered.lock();
        if registered.get(&kind) == Some(&handle) {
            registered.remove(&kind);
        }
        trace!("Detached {} listener #{}", kind, handle);
    }

    fn release_stale(&self) -> usize {
        let stale: Vec<(ListenerKind, u64)> = self.registered.lock().drain().collect();
        let mut listeners = self.listeners.lock();
        for (kind, handle) in &stale {
            if let Some(handles) = listeners.get_mut(kind) {
                handles.retain(|h| h != handle);
            }
        }
        stale.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_detach() {
        let host = MemoryEventHost::new();
        let a = host.attach(ListenerKind::Click).unwrap();
        let b = host.attach(ListenerKind::Click).unwrap();
        assert_ne!(a, b);
        assert_eq!(host.listener_count(ListenerKind::Click), 2);

        host.detach(ListenerKind::Click, a);
        assert_eq!(host.listener_count(ListenerKind::Click), 1);
        assert_eq!(host.total_listeners(), 1);
    }

    #[test]
    fn test_detach_unknown_handle_is_noop() {
        let host = MemoryEventHost::new();
        host.attach(ListenerKind::KeyDown).unwrap();
        host.detach(ListenerKind::KeyDown, 999);
        host.detach(ListenerKind::Change, 0);
        assert_eq!(host.total_listeners(), 1);
    }

    #[test]
    fn test_release_stale_detaches_registered() {
        let host = MemoryEventHost::new();
        host.attach(ListenerKind::Click).unwrap();
        let key = host.attach(ListenerKind::KeyDown).unwrap();
        host.detach(ListenerKind::KeyDown, key);

        assert_eq!(host.release_stale(), 1);
        assert_eq!(host.total_listeners(), 0);
        assert_eq!(host.release_stale(), 0);
    }

    #[test]
    fn test_fail_on() {
        let host = MemoryEventHost::new();
        host.fail_on(ListenerKind::Change);
        let err = host.attach(ListenerKind::Change).unwrap_err();
        assert!(err.to_string().contains("change"));
        assert_eq!(host.total_listeners(), 0);

        host.allow(ListenerKind::Change);
        assert!(host.attach(ListenerKind::Change).is_ok());
    }
}
