//! `fetch`-based notifier.

use js_sys::Reflect;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{console, RequestInit, RequestMode};

use pinpoint_protocols::{CapturedElement, SelectionEvent, SelectionNotifier};

const SELECTED_KEY: &str = "_selectedElement";

/// Fires a body-less `no-cors` GET per selection and echoes the capture to
/// the console. The response is never inspected and rejections are swallowed.
pub struct FetchNotifier {
    base: String,
}

impl FetchNotifier {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }
}

impl SelectionNotifier for FetchNotifier {
    fn name(&self) -> &str {
        "fetch"
    }

    fn notify(&self, event: SelectionEvent, capture: &CapturedElement) {
        if let Ok(value) = to_js(capture) {
            console::log_2(&JsValue::from_str(&format!("Pinpoint {}:", event)), &value);
        }
        // The listener reads the primary capture off the window when signalled.
        if publishes_selection(event) {
            reflect_selection(Some(capture));
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::NoCors);

        let promise = window.fetch_with_str_and_init(&event.endpoint(&self.base), &init);
        spawn_local(async move {
            let _ = JsFuture::from(promise).await;
        });
    }
}

/// Whether `event` replaces the capture exposed on the window.
fn publishes_selection(event: SelectionEvent) -> bool {
    matches!(
        event,
        SelectionEvent::ElementSelected | SelectionEvent::PrimarySelected
    )
}

/// Publish the primary capture as `window._selectedElement`, or `null`.
pub(crate) fn reflect_selection(capture: Option<&CapturedElement>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let value = match capture.map(to_js) {
        Some(Ok(value)) => value,
        Some(Err(_)) | None => JsValue::NULL,
    };
    let _ = Reflect::set(&window, &JsValue::from_str(SELECTED_KEY), &value);
}

/// Plain-object conversion (maps become objects, not `Map`s).
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secondary_does_not_replace_window_selection() {
        assert!(publishes_selection(SelectionEvent::ElementSelected));
        assert!(publishes_selection(SelectionEvent::PrimarySelected));
        assert!(!publishes_selection(SelectionEvent::SecondarySelected));
    }

    #[test]
    fn test_base_trailing_slash_trimmed() {
        let notifier = FetchNotifier::new("http://127.0.0.1:8080/api/");
        assert_eq!(
            SelectionEvent::ElementSelected.endpoint(&notifier.base),
            "http://127.0.0.1:8080/api/notify-element-selected"
        );
    }
}
