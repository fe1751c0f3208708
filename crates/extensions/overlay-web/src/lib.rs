//! # Pinpoint Overlay (browser)
//!
//! wasm-bindgen build of the annotation engine for injection into a live page.
//!
//! JavaScript surface:
//!
//! - `installOverlay(policy?)` - insert styles and listeners (idempotent)
//! - `setAnnotationMode(enabled)` - toggle annotation, truthy coercion
//! - `unlockElement()` - release every selection, always `true`
//! - `selectedElement()` - primary capture or `null`
//! - `secondarySelections()` - secondary captures in click order
//! - `teardownOverlay()` - remove listeners and styles
//!
//! The primary capture is also published as `window._selectedElement`
//! (`null` when nothing is locked) for consumers that read the property.

use wasm_bindgen::prelude::*;

mod document;
mod host;
mod notify;
mod overlay;

pub use document::WebDocument;
pub use host::WebEventHost;
pub use notify::FetchNotifier;

use notify::to_js;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(js_name = installOverlay)]
pub fn install_overlay(policy: Option<String>) -> Result<bool, JsValue> {
    overlay::install(policy.as_deref())
}

#[wasm_bindgen(js_name = setAnnotationMode)]
pub fn set_annotation_mode(enabled: JsValue) -> Result<(), JsValue> {
    let enabled = enabled.is_truthy();
    overlay::with_engine(|engine| engine.set_mode(enabled))
}

#[wasm_bindgen(js_name = unlockElement)]
pub fn unlock_element() -> bool {
    overlay::with_engine(|engine| engine.unlock()).unwrap_or(true)
}

#[wasm_bindgen(js_name = selectedElement)]
pub fn selected_element() -> Result<JsValue, JsValue> {
    match overlay::selected_element() {
        Some(capture) => to_js(&capture),
        None => Ok(JsValue::NULL),
    }
}

#[wasm_bindgen(js_name = secondarySelections)]
pub fn secondary_selections() -> Result<JsValue, JsValue> {
    to_js(&overlay::secondary_selections())
}

#[wasm_bindgen(js_name = teardownOverlay)]
pub fn teardown_overlay() -> bool {
    overlay::teardown()
}
