//! `Document` over the live browser DOM.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use web_sys::{
    Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use pinpoint_protocols::{ControlKind, Document, OverlayError};

/// Input types that accept typed text.
fn is_text_input_type(input_type: &str) -> bool {
    matches!(
        input_type.to_ascii_lowercase().as_str(),
        ""
            | "text"
            | "search"
            | "email"
            | "password"
            | "tel"
            | "url"
            | "number"
            | "date"
            | "time"
            | "datetime-local"
            | "month"
            | "week"
    )
}

pub struct WebDocument {
    document: web_sys::Document,
    /// Inline body cursor saved while the overlay overrides it.
    saved_cursor: RefCell<Option<String>>,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Self {
        Self {
            document,
            saved_cursor: RefCell::new(None),
        }
    }

    pub fn inner(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn tag_name(&self, node: &Element) -> Option<String> {
        Some(node.tag_name())
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn attributes(&self, node: &Element) -> Vec<(String, String)> {
        let map = node.attributes();
        (0..map.length())
            .filter_map(|i| map.item(i))
            .map(|attr| (attr.name(), attr.value()))
            .collect()
    }

    fn text_content(&self, node: &Element) -> Option<String> {
        node.text_content()
    }

    fn value(&self, node: &Element) -> Option<String> {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(textarea) = node.dyn_ref::<HtmlTextAreaElement>() {
            Some(textarea.value())
        } else {
            node.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
        }
    }

    fn parent_element(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn previous_element_sibling(&self, node: &Element) -> Option<Element> {
        node.previous_element_sibling()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn control_kind(&self, node: &Element) -> ControlKind {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            return if is_text_input_type(&input.type_()) {
                ControlKind::TextInput
            } else {
                ControlKind::Other
            };
        }
        if node.is_instance_of::<HtmlTextAreaElement>() {
            return ControlKind::TextArea;
        }
        if node.is_instance_of::<HtmlSelectElement>() {
            return ControlKind::Select;
        }
        match node.dyn_ref::<HtmlElement>() {
            Some(el) if el.is_content_editable() => ControlKind::Editable,
            _ => ControlKind::Other,
        }
    }

    fn set_viewport_cursor(&self, cursor: Option<&str>) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let mut saved = self.saved_cursor.borrow_mut();

        match cursor {
            Some(cursor) => {
                if saved.is_none() {
                    *saved = Some(style.get_property_value("cursor").unwrap_or_default());
                }
                let _ = style.set_property("cursor", cursor);
            }
            None => {
                let _ = match saved.take() {
                    Some(previous) if !previous.is_empty() => {
                        style.set_property("cursor", &previous)
                    }
                    Some(_) => style.remove_property("cursor").map(|_| ()),
                    None => Ok(()),
                };
            }
        }
    }

    fn insert_style(&self, id: &str, css: &str) -> Result<(), OverlayError> {
        let style_error = |message: String| OverlayError::StyleInstall {
            id: id.to_string(),
            message,
        };

        let style = self
            .document
            .create_element("style")
            .map_err(|e| style_error(format!("{:?}", e)))?;
        style.set_id(id);
        style.set_text_content(Some(css));

        let parent: Element = match self.document.head() {
            Some(head) => head.into(),
            None => self
                .document
                .document_element()
                .ok_or_else(|| OverlayError::DocumentUnavailable("no document element".into()))?,
        };
        parent
            .append_child(&style)
            .map_err(|e| style_error(format!("{:?}", e)))?;
        Ok(())
    }

    fn remove_style(&self, id: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(existing) => {
                existing.remove();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_types() {
        assert!(is_text_input_type(""));
        assert!(is_text_input_type("Email"));
        assert!(is_text_input_type("search"));
        assert!(is_text_input_type("datetime-local"));
        assert!(is_text_input_type("week"));
        assert!(!is_text_input_type("checkbox"));
        assert!(!is_text_input_type("submit"));
    }
}
