//! Arena-backed document.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use pinpoint_protocols::{ControlKind, Document, OverlayError};

use crate::error::FixtureError;
use crate::fixture::PageFixture;

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

/// Element handle: an index into the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

const FORM_CONTROLS: [&str; 5] = ["input", "textarea", "select", "button", "option"];

const TEXT_INPUT_TYPES: [&str; 13] = [
    "text", "search", "email", "password", "tel", "url", "number", "date", "time",
    "datetime-local", "month", "week", "",
];

#[derive(Debug, Clone)]
struct NodeData {
    /// Lowercase tag.
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn element(tag: &str, parent: Option<NodeId>) -> Self {
        let tag = tag.to_lowercase();
        let value = FORM_CONTROLS.contains(&tag.as_str()).then(String::new);
        Self {
            tag,
            attributes: Vec::new(),
            text: String::new(),
            value,
            parent,
            children: Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn classes(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
struct DocumentState {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    body: Option<NodeId>,
    /// `(id, css)` for every inserted `<style>`.
    styles: Vec<(String, String)>,
    /// Inline cursor on the viewport.
    cursor: Option<String>,
    /// Page cursor saved while the overlay overrides it.
    saved_cursor: Option<Option<String>>,
}

impl DocumentState {
    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = data.parent {
            if let Some(parent) = self.nodes.get_mut(parent.0) {
                parent.children.push(id);
            }
        }
        self.nodes.push(data);
        id
    }

    fn build(&mut self, fixture: &PageFixture, parent: Option<NodeId>) -> NodeId {
        let mut data = NodeData::element(&fixture.tag, parent);
        data.attributes = fixture
            .attributes
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect();
        data.text = fixture.text.clone().unwrap_or_default();
        if data.value.is_some() {
            data.value = fixture
                .value
                .clone()
                .or_else(|| data.attribute("value").map(str::to_string))
                .or(Some(String::new()));
        } else if fixture.value.is_some() {
            data.value = fixture.value.clone();
        }

        let id = self.push(data);
        for child in &fixture.children {
            self.build(child, Some(id));
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.0)
    }

    /// Pre-order traversal from the root.
    fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.node(id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn text_content(&self, id: NodeId) -> Option<String> {
        let node = self.node(id)?;
        let mut text = node.text.clone();
        for child in &node.children {
            if let Some(child_text) = self.text_content(*child) {
                text.push_str(&child_text);
            }
        }
        Some(text)
    }

    fn is_editable(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(node) = self.node(node_id) else {
                return false;
            };
            match node.attribute("contenteditable") {
                Some("false") => return false,
                Some(_) => return true,
                None => current = node.parent,
            }
        }
        false
    }
}

/// In-memory page.
#[derive(Debug)]
pub struct MemoryDocument {
    state: RwLock<DocumentState>,
}

impl MemoryDocument {
    /// Build a page from a fixture rooted at `<html>` or `<body>`.
    ///
    /// A `<body>` root is wrapped in a synthetic `<html>`.
    pub fn from_fixture(fixture: &PageFixture) -> Result<Self, FixtureError> {
        let mut state = DocumentState::default();

        let root = match fixture.tag.to_lowercase().as_str() {
            "html" => state.build(fixture, None),
            "body" => {
                let html = state.push(NodeData::element("html", None));
                state.build(fixture, Some(html));
                html
            }
            other => return Err(FixtureError::InvalidRoot(other.to_string())),
        };
        state.root = Some(root);

        let body = state
            .node(root)
            .and_then(|html| {
                html.children
                    .iter()
                    .copied()
                    .find(|c| state.node(*c).is_some_and(|n| n.tag == "body"))
            })
            .ok_or(FixtureError::MissingBody)?;
        state.body = Some(body);

        Ok(Self {
            state: RwLock::new(state),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Self::from_fixture(&PageFixture::from_json(json)?)
    }

    /// `<html><body></body></html>`.
    pub fn empty() -> Self {
        let mut state = DocumentState::default();
        let html = state.push(NodeData::element("html", None));
        let body = state.push(NodeData::element("body", Some(html)));
        state.root = Some(html);
        state.body = Some(body);
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.state.read().root
    }

    /// Append a new element under `parent`, or create it detached when
    /// `parent` is `None`.
    pub fn create_element(&self, parent: Option<NodeId>, tag: &str) -> NodeId {
        self.state.write().push(NodeData::element(tag, parent))
    }

    pub fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.state.write().node_mut(node) {
            data.set_attribute(name, value.to_string());
        }
    }

    pub fn set_text(&self, node: NodeId, text: &str) {
        if let Some(data) = self.state.write().node_mut(node) {
            data.text = text.to_string();
        }
    }

    /// Child elements in order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.state
            .read()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// First element in document order carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let state = self.state.read();
        state
            .document_order()
            .into_iter()
            .find(|n| state.node(*n).and_then(|d| d.attribute("id")) == Some(id))
    }

    /// Attached elements carrying `id`, in document order.
    pub fn elements_with_id(&self, id: &str) -> Vec<NodeId> {
        let state = self.state.read();
        state
            .document_order()
            .into_iter()
            .filter(|n| state.node(*n).and_then(|d| d.attribute("id")) == Some(id))
            .collect()
    }

    /// Attached elements with `tag`, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_lowercase();
        let state = self.state.read();
        state
            .document_order()
            .into_iter()
            .filter(|n| state.node(*n).is_some_and(|d| d.tag == tag))
            .collect()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.state
            .read()
            .node(node)
            .map(NodeData::classes)
            .unwrap_or_default()
    }

    /// Attached elements currently carrying `class`.
    pub fn nodes_with_class(&self, class: &str) -> Vec<NodeId> {
        let state = self.state.read();
        state
            .document_order()
            .into_iter()
            .filter(|n| {
                state
                    .node(*n)
                    .is_some_and(|d| d.classes().iter().any(|c| c == class))
            })
            .collect()
    }

    pub fn style_count(&self, id: &str) -> usize {
        self.state
            .read()
            .styles
            .iter()
            .filter(|(style_id, _)| style_id == id)
            .count()
    }

    pub fn style_css(&self, id: &str) -> Option<String> {
        self.state
            .read()
            .styles
            .iter()
            .find(|(style_id, _)| style_id == id)
            .map(|(_, css)| css.clone())
    }

    pub fn viewport_cursor(&self) -> Option<String> {
        self.state.read().cursor.clone()
    }

    /// Set the viewport cursor the way page script would, bypassing the
    /// overlay's save and restore.
    pub fn set_page_cursor(&self, cursor: Option<&str>) {
        self.state.write().cursor = cursor.map(str::to_string);
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        if let Some(data) = self.state.write().node_mut(node) {
            data.value = Some(value.to_string());
        }
    }

    /// Default action of keystrokes reaching `node`: commit `text` into a
    /// text control's value or an editable region's text.
    ///
    /// Returns whether anything was committed.
    pub fn type_text(&self, node: NodeId, text: &str) -> bool {
        let kind = self.control_kind(&node);
        let mut state = self.state.write();
        let Some(data) = state.node_mut(node) else {
            return false;
        };
        match kind {
            ControlKind::TextInput | ControlKind::TextArea => {
                data.value.get_or_insert_with(String::new).push_str(text);
                true
            }
            ControlKind::Editable => {
                data.text.push_str(text);
                true
            }
            ControlKind::Select | ControlKind::Other => false,
        }
    }

    pub(crate) fn tag_of(&self, node: NodeId) -> Option<String> {
        self.state.read().node(node).map(|d| d.tag.clone())
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn tag_name(&self, node: &NodeId) -> Option<String> {
        self.state.read().node(*node).map(|d| d.tag.to_uppercase())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.state
            .read()
            .node(*node)
            .and_then(|d| d.attribute(name).map(str::to_string))
    }

    fn attributes(&self, node: &NodeId) -> Vec<(String, String)> {
        self.state
            .read()
            .node(*node)
            .map(|d| d.attributes.clone())
            .unwrap_or_default()
    }

    fn text_content(&self, node: &NodeId) -> Option<String> {
        self.state.read().text_content(*node)
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.state.read().node(*node).and_then(|d| d.value.clone())
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        self.state.read().node(*node).and_then(|d| d.parent)
    }

    fn previous_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let state = self.state.read();
        let parent = state.node(*node)?.parent?;
        let siblings = &state.node(parent)?.children;
        let position = siblings.iter().position(|s| s == node)?;
        position.checked_sub(1).map(|i| siblings[i])
    }

    fn body(&self) -> Option<NodeId> {
        self.state.read().body
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.state
            .read()
            .node(*node)
            .is_some_and(|d| d.classes().iter().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut state = self.state.write();
        let Some(data) = state.node_mut(*node) else {
            return;
        };
        let mut classes = data.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            data.set_attribute("class", classes.join(" "));
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let mut state = self.state.write();
        let Some(data) = state.node_mut(*node) else {
            return;
        };
        let classes = data.classes();
        if classes.iter().any(|c| c == class) {
            let remaining: Vec<_> = classes.into_iter().filter(|c| c != class).collect();
            data.set_attribute("class", remaining.join(" "));
        }
    }

    fn control_kind(&self, node: &NodeId) -> ControlKind {
        let state = self.state.read();
        let Some(data) = state.node(*node) else {
            return ControlKind::Other;
        };
        match data.tag.as_str() {
            "input" => {
                let input_type = data.attribute("type").unwrap_or("").to_lowercase();
                if TEXT_INPUT_TYPES.contains(&input_type.as_str()) {
                    ControlKind::TextInput
                } else {
                    ControlKind::Other
                }
            }
            "textarea" => ControlKind::TextArea,
            "select" => ControlKind::Select,
            _ if state.is_editable(*node) => ControlKind::Editable,
            _ => ControlKind::Other,
        }
    }

    fn set_viewport_cursor(&self, cursor: Option<&str>) {
        let mut state = self.state.write();
        match cursor {
            Some(cursor) => {
                if state.saved_cursor.is_none() {
                    state.saved_cursor = Some(state.cursor.take());
                }
                state.cursor = Some(cursor.to_string());
            }
            None => {
                if let Some(previous) = state.saved_cursor.take() {
                    state.cursor = previous;
                }
            }
        }
    }

    fn insert_style(&self, id: &str, css: &str) -> Result<(), OverlayError> {
        self.state
            .write()
            .styles
            .push((id.to_string(), css.to_string()));
        Ok(())
    }

    fn remove_style(&self, id: &str) -> bool {
        let mut state = self.state.write();
        let before = state.styles.len();
        state.styles.retain(|(style_id, _)| style_id != id);
        state.styles.len() != before
    }
}
