//! Host document capabilities.
//!
//! The engine never touches a concrete DOM. Everything it reads or mutates on
//! the page goes through [`Document`], and every read accessor returns an
//! `Option` so a node lacking a capability yields an absent value instead of
//! failing the whole capture.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;
use crate::events::ListenerKind;

/// Form-control classification used by the input suppressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// An `<input>` that accepts typed text.
    TextInput,
    /// A `<textarea>`.
    TextArea,
    /// Any element with `contenteditable` enabled.
    Editable,
    /// A `<select>` dropdown.
    Select,
    /// Everything else.
    #[default]
    Other,
}

impl ControlKind {
    /// Whether keystrokes on this control would commit text.
    pub fn accepts_text(self) -> bool {
        matches!(
            self,
            ControlKind::TextInput | ControlKind::TextArea | ControlKind::Editable
        )
    }
}

/// Capability view of a page document.
///
/// `Node` is a live, non-owning handle. Cloning it must be cheap and must not
/// copy the underlying element; equality must be identity.
pub trait Document {
    /// Element handle type.
    type Node: Clone + PartialEq + fmt::Debug;

    /// Tag name as the DOM reports it (uppercase for HTML elements).
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    /// Value of a single attribute.
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    /// All attributes in document order.
    fn attributes(&self, node: &Self::Node) -> Vec<(String, String)>;

    /// Concatenated descendant text.
    fn text_content(&self, node: &Self::Node) -> Option<String>;

    /// Current value of a form control, `None` for elements without one.
    fn value(&self, node: &Self::Node) -> Option<String>;

    /// Parent element, `None` at the root or for detached nodes.
    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Nearest preceding sibling that is an element.
    fn previous_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The document's `<body>`.
    fn body(&self) -> Option<Self::Node>;

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    fn control_kind(&self, node: &Self::Node) -> ControlKind;

    /// Set the cursor shown over the whole viewport. `None` restores the default.
    fn set_viewport_cursor(&self, cursor: Option<&str>);

    /// Insert a `<style>` element carrying `id`.
    fn insert_style(&self, id: &str, css: &str) -> Result<(), OverlayError>;

    /// Remove the `<style>` element carrying `id`. Returns whether one existed.
    fn remove_style(&self, id: &str) -> bool;

    fn id(&self, node: &Self::Node) -> Option<String> {
        self.attribute(node, "id")
    }

    fn class_name(&self, node: &Self::Node) -> Option<String> {
        self.attribute(node, "class")
    }

    /// Whether `node` is the document body.
    fn is_body(&self, node: &Self::Node) -> bool {
        self.body().is_some_and(|body| &body == node)
    }
}

/// Attaches page-level listeners on behalf of the setup guard.
///
/// The returned handle is whatever the host needs to later detach the same
/// listener (a closure, a token, a counter).
pub trait EventHost {
    type Handle;

    fn attach(&self, kind: ListenerKind) -> Result<Self::Handle, OverlayError>;

    fn detach(&self, kind: ListenerKind, handle: Self::Handle);

    /// Detach listeners an earlier installation left registered on the page
    /// but that this host holds no handle for, such as those of a previous
    /// script instance. Returns how many were removed.
    fn release_stale(&self) -> usize {
        0
    }
}
