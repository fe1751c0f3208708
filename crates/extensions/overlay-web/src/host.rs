//! Document-level listeners backed by wasm-bindgen closures.
//!
//! Every attached callback is also recorded on `window.__pinpointOverlay`,
//! keyed by listener kind. A re-injected script is a fresh wasm instance with
//! an empty registration table; the page-level record is how it finds and
//! detaches the callbacks of the instance it replaces.

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

use pinpoint_protocols::{EventHost, ListenerKind, OverlayError};

use crate::overlay;

type Listener = Closure<dyn FnMut(Event)>;

const PAGE_KEY: &str = "__pinpointOverlay";
const INSTALLED_KEY: &str = "installed";

/// Page-level record shared by every script instance, created on first use.
fn page_record() -> Option<Object> {
    let window = web_sys::window()?;
    let key = JsValue::from_str(PAGE_KEY);
    if let Ok(existing) = Reflect::get(&window, &key) {
        if let Some(record) = existing.dyn_ref::<Object>() {
            return Some(record.clone());
        }
    }
    let record = Object::new();
    Reflect::set(&window, &key, &record).ok()?;
    Some(record)
}

/// Attaches listeners to the document. Each handle owns the closure, so
/// dropping it after detaching frees the callback.
pub struct WebEventHost {
    document: web_sys::Document,
    record: Option<Object>,
}

impl WebEventHost {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            record: page_record(),
        }
    }

    /// Mirror the guard's installed flag onto the page record.
    pub fn set_installed(&self, installed: bool) {
        if let Some(record) = &self.record {
            let _ = Reflect::set(
                record,
                &JsValue::from_str(INSTALLED_KEY),
                &JsValue::from_bool(installed),
            );
        }
    }

    fn remove(&self, kind: ListenerKind, callback: &Function) {
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            kind.dom_event(),
            callback,
            kind.capture_phase(),
        );
    }
}

impl EventHost for WebEventHost {
    type Handle = Listener;

    fn attach(&self, kind: ListenerKind) -> Result<Listener, OverlayError> {
        let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            handle_event(kind, &event);
        });

        self.document
            .add_event_listener_with_callback_and_bool(
                kind.dom_event(),
                listener.as_ref().unchecked_ref(),
                kind.capture_phase(),
            )
            .map_err(|e| OverlayError::ListenerAttach {
                kind,
                message: format!("{:?}", e),
            })?;

        if let Some(record) = &self.record {
            let _ = Reflect::set(record, &JsValue::from_str(kind.as_str()), listener.as_ref());
        }
        Ok(listener)
    }

    fn detach(&self, kind: ListenerKind, handle: Listener) {
        let callback: &Function = handle.as_ref().unchecked_ref();
        self.remove(kind, callback);

        if let Some(record) = &self.record {
            let key = JsValue::from_str(kind.as_str());
            let owned = Reflect::get(record, &key)
                .map(|current| current == *handle.as_ref())
                .unwrap_or(false);
            if owned {
                let _ = Reflect::delete_property(record, &key);
            }
        }
    }

    fn release_stale(&self) -> usize {
        let Some(record) = &self.record else {
            return 0;
        };

        let mut released = 0;
        for kind in ListenerKind::ALL {
            let key = JsValue::from_str(kind.as_str());
            let Ok(value) = Reflect::get(record, &key) else {
                continue;
            };
            if let Some(callback) = value.dyn_ref::<Function>() {
                self.remove(kind, callback);
                released += 1;
            }
            let _ = Reflect::delete_property(record, &key);
        }
        self.set_installed(false);
        released
    }
}

fn handle_event(kind: ListenerKind, event: &Event) {
    let Some(target) = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
    else {
        return;
    };

    if let Some(disposition) = overlay::dispatch(kind, &target) {
        if disposition.prevent_default {
            event.prevent_default();
        }
        if disposition.stop_propagation {
            event.stop_propagation();
        }
    }
}
