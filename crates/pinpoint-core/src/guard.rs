//! Setup/teardown guard.
//!
//! Installation may run any number of times per page (script re-injection
//! after a soft navigation). The guard keeps a registration table of the
//! listeners it attached and the id of the style element it inserted, so a
//! repeat install never leaves duplicates behind.

use tracing::{debug, info};

use pinpoint_config::StyleConfig;
use pinpoint_protocols::{Document, EventHost, ListenerKind, OverlayError};

use crate::registry::ListenerRegistry;
use crate::styles::stylesheet;

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;

/// Installs the overlay stylesheet and page listeners exactly once.
pub struct SetupGuard<H: EventHost> {
    registry: ListenerRegistry<H::Handle>,
    style_id: String,
    css: String,
    done: bool,
}

impl<H: EventHost> SetupGuard<H> {
    pub fn new(styles: &StyleConfig, cursor: &str) -> Self {
        Self {
            registry: ListenerRegistry::new(),
            style_id: styles.style_id.clone(),
            css: stylesheet(styles, cursor),
            done: false,
        }
    }

    pub fn is_installed(&self) -> bool {
        self.done
    }

    pub fn registry(&self) -> &ListenerRegistry<H::Handle> {
        &self.registry
    }

    /// Insert the stylesheet and attach all six listeners.
    ///
    /// Returns `Ok(false)` when already installed. On error the guard stays
    /// uninstalled and a later call retries from the start; listeners attached
    /// before the failure are replaced, not duplicated.
    pub fn install<D: Document>(&mut self, document: &D, host: &H) -> Result<bool, OverlayError> {
        if self.done {
            debug!("Overlay already installed, skipping setup");
            return Ok(false);
        }

        if document.remove_style(&self.style_id) {
            debug!("Removed stale style element '{}'", self.style_id);
        }
        document.insert_style(&self.style_id, &self.css)?;

        if self.registry.is_empty() {
            let stale = host.release_stale();
            if stale > 0 {
                info!(stale, "Released listeners left by an earlier installation");
            }
        }

        for kind in ListenerKind::ALL {
            if let Some(previous) = self.registry.take(kind) {
                host.detach(kind, previous);
            }
            let handle = host.attach(kind)?;
            self.registry.replace(kind, handle);
        }

        self.done = true;
        info!(
            listeners = self.registry.len(),
            style_id = %self.style_id,
            "Overlay installed"
        );
        Ok(true)
    }

    /// Detach every registered listener and remove the stylesheet.
    pub fn teardown<D: Document>(&mut self, document: &D, host: &H) {
        for (kind, handle) in self.registry.drain() {
            host.detach(kind, handle);
        }
        document.remove_style(&self.style_id);
        self.done = false;
        info!("Overlay torn down");
    }
}
