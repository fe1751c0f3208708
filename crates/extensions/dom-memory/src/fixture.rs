//! JSON page fixtures.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pinpoint_protocols::AttributeMap;

use crate::error::FixtureError;

/// A page element as written in a fixture file.
///
/// ```json
/// { "tag": "ul", "attributes": { "id": "list" },
///   "children": [ { "tag": "li", "text": "one" } ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    pub tag: String,

    /// Attributes in document order.
    #[serde(default)]
    pub attributes: AttributeMap,

    /// Direct text, placed before the children.
    #[serde(default)]
    pub text: Option<String>,

    /// Initial form control value.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(default)]
    pub children: Vec<PageFixture>,
}

impl PageFixture {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_child(mut self, child: PageFixture) -> Self {
        self.children.push(child);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
