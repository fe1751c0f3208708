//! Captured element data delivered to external listeners.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;

/// Attribute name to value mapping that keeps DOM attribute order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributeMap(Vec<(String, String)>);

impl AttributeMap {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an attribute. A repeated name overwrites in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }
}

impl FromIterator<(String, String)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(n, v)| (n, v)))
    }
}

impl<'de> Deserialize<'de> for AttributeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = AttributeMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = AttributeMap::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    map.insert(name, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// Snapshot of an element taken at the moment it was locked.
///
/// Field names serialize in camelCase, matching what page-side consumers
/// expect (`tagName`, `textContent`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedElement {
    /// Tag name as reported by the DOM (uppercase for HTML).
    pub tag_name: String,
    pub id: String,
    pub class_name: String,
    /// Text content, truncated.
    pub text_content: String,
    /// Form control value, `null` when the element has none.
    pub value: Option<String>,
    /// Canonical locator.
    pub xpath: Option<String>,
    #[serde(default)]
    pub attributes: AttributeMap,
}

impl CapturedElement {
    /// One-line description for logs.
    pub fn summary(&self) -> String {
        let text: String = self.text_content.chars().take(50).collect();
        format!(
            "<{}> '{}' (XPath: {})",
            self.tag_name,
            text.replace('\n', " ").trim(),
            self.xpath.as_deref().unwrap_or("N/A")
        )
    }
}
