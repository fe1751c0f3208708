//! Page-wide overlay instance.
//!
//! One overlay per page lives in a thread-local slot. Listeners reach it
//! through [`dispatch`]; a dispatch that arrives while the slot is already
//! borrowed (a handler synchronously triggering another event) is dropped.

use std::cell::RefCell;
use std::fmt::Display;
use std::sync::Arc;

use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::{console, Element};

use pinpoint_config::{Config, SelectionPolicy};
use pinpoint_core::{AnnotationEngine, SetupGuard};
use pinpoint_protocols::{CapturedElement, EventDisposition, ListenerKind};

use crate::document::WebDocument;
use crate::host::WebEventHost;
use crate::notify::{reflect_selection, FetchNotifier};

struct Overlay {
    engine: AnnotationEngine<WebDocument>,
    guard: SetupGuard<WebEventHost>,
    host: WebEventHost,
}

thread_local! {
    static OVERLAY: RefCell<Option<Overlay>> = const { RefCell::new(None) };
}

pub(crate) fn js_error(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

pub(crate) fn dispatch(kind: ListenerKind, target: &Element) -> Option<EventDisposition> {
    OVERLAY.with(|slot| match slot.try_borrow_mut() {
        Ok(mut overlay) => overlay
            .as_mut()
            .map(|overlay| overlay.engine.dispatch(kind, target)),
        Err(_) => {
            warn!("Re-entrant {} dispatch dropped", kind);
            console::warn_1(&JsValue::from_str("Pinpoint: re-entrant event dropped"));
            None
        }
    })
}

/// Install the overlay once. Returns `false` when it was already installed.
pub(crate) fn install(policy: Option<&str>) -> Result<bool, JsValue> {
    OVERLAY.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(js_error)?;

        if let Some(overlay) = slot.as_mut() {
            let installed = overlay
                .guard
                .install(overlay.engine.document(), &overlay.host)
                .map_err(js_error)?;
            overlay.host.set_installed(overlay.guard.is_installed());
            return Ok(installed);
        }

        let mut config = Config::default();
        if let Some(policy) = policy {
            config.overlay.policy = policy.parse::<SelectionPolicy>().map_err(js_error)?;
        }

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| js_error("no document available"))?;

        let engine = AnnotationEngine::new(
            WebDocument::new(document.clone()),
            &config,
            Arc::new(FetchNotifier::new(&config.notify.endpoint)),
        );
        let host = WebEventHost::new(document);
        let mut guard = SetupGuard::new(&config.styles, &config.overlay.cursor);

        if let Err(e) = guard.install(engine.document(), &host) {
            guard.teardown(engine.document(), &host);
            return Err(js_error(e));
        }
        host.set_installed(true);
        reflect_selection(None);

        *slot = Some(Overlay {
            engine,
            guard,
            host,
        });
        Ok(true)
    })
}

pub(crate) fn teardown() -> bool {
    OVERLAY.with(|slot| match slot.try_borrow_mut() {
        Ok(mut slot) => match slot.take() {
            Some(mut overlay) => {
                overlay.engine.set_mode(false);
                overlay
                    .guard
                    .teardown(overlay.engine.document(), &overlay.host);
                overlay.host.set_installed(false);
                reflect_selection(None);
                true
            }
            None => false,
        },
        Err(_) => false,
    })
}

/// Run `f` against the installed engine, installing with defaults first if
/// needed. `window._selectedElement` is re-synced afterwards.
pub(crate) fn with_engine<T>(
    f: impl FnOnce(&mut AnnotationEngine<WebDocument>) -> T,
) -> Result<T, JsValue> {
    let installed = OVERLAY.with(|slot| slot.try_borrow().map(|s| s.is_some()).unwrap_or(false));
    if !installed {
        install(None)?;
    }

    OVERLAY.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(js_error)?;
        let overlay = slot
            .as_mut()
            .ok_or_else(|| js_error("overlay not installed"))?;
        let result = f(&mut overlay.engine);
        reflect_selection(overlay.engine.selected_element());
        Ok(result)
    })
}

/// Read from the engine without installing.
pub(crate) fn read<T>(f: impl FnOnce(&AnnotationEngine<WebDocument>) -> T) -> Option<T> {
    OVERLAY.with(|slot| {
        slot.try_borrow()
            .ok()
            .and_then(|overlay| overlay.as_ref().map(|o| f(&o.engine)))
    })
}

pub(crate) fn selected_element() -> Option<CapturedElement> {
    read(|engine| engine.selected_element().cloned()).flatten()
}

pub(crate) fn secondary_selections() -> Vec<CapturedElement> {
    read(|engine| engine.secondary_selections()).unwrap_or_default()
}
