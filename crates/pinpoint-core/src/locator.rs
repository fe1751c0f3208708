//! Locator synthesis and element capture.

use pinpoint_protocols::{AttributeMap, CapturedElement, Document};

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;

const BODY_PATH: &str = "/html/body";

/// Builds canonical XPaths and captures for live elements.
#[derive(Debug, Clone)]
pub struct LocatorSynthesizer {
    text_limit: usize,
}

impl LocatorSynthesizer {
    pub fn new(text_limit: usize) -> Self {
        Self { text_limit }
    }

    /// Canonical XPath for `node`.
    ///
    /// An element with an `id` is addressed by it. The body is `/html/body`.
    /// Anything else is its parent's path plus `/tag[n]`, where `n` counts
    /// same-tag element siblings up to and including `node`. Returns `None`
    /// when the walk reaches an element with no parent before finding an id
    /// or the body.
    pub fn xpath<D: Document>(&self, document: &D, node: &D::Node) -> Option<String> {
        let mut steps = Vec::new();
        let mut current = node.clone();

        let anchor = loop {
            if let Some(id) = document.id(&current).filter(|id| !id.is_empty()) {
                break format!("//*[@id=\"{}\"]", id);
            }
            if document.is_body(&current) {
                break BODY_PATH.to_string();
            }

            let tag = document.tag_name(&current).unwrap_or_default();
            steps.push(format!(
                "{}[{}]",
                tag.to_lowercase(),
                same_tag_index(document, &current, &tag)
            ));
            current = document.parent_element(&current)?;
        };

        let mut path = anchor;
        for step in steps.iter().rev() {
            path.push('/');
            path.push_str(step);
        }
        Some(path)
    }

    /// All attributes of `node`, verbatim and in order.
    pub fn attributes<D: Document>(&self, document: &D, node: &D::Node) -> AttributeMap {
        document.attributes(node).into_iter().collect()
    }

    /// Snapshot of `node`. Missing values become empty strings or `None`.
    pub fn capture<D: Document>(&self, document: &D, node: &D::Node) -> CapturedElement {
        let text = document.text_content(node).unwrap_or_default();
        CapturedElement {
            tag_name: document.tag_name(node).unwrap_or_default(),
            id: document.id(node).unwrap_or_default(),
            class_name: document.class_name(node).unwrap_or_default(),
            text_content: text.chars().take(self.text_limit).collect(),
            value: document.value(node),
            xpath: self.xpath(document, node),
            attributes: self.attributes(document, node),
        }
    }
}

fn same_tag_index<D: Document>(document: &D, node: &D::Node, tag: &str) -> usize {
    let mut index = 1;
    let mut sibling = document.previous_element_sibling(node);
    while let Some(current) = sibling {
        if document
            .tag_name(&current)
            .is_some_and(|t| t.eq_ignore_ascii_case(tag))
        {
            index += 1;
        }
        sibling = document.previous_element_sibling(&current);
    }
    index
}
