//! Locator evaluation and capture lookup.
//!
//! Only the XPath subset the locator synthesizer produces is understood:
//! an optional `//*[@id="..."]` anchor followed by `/tag` or `/tag[n]` steps,
//! or an absolute path starting at `/html`.

use tracing::debug;

use pinpoint_protocols::CapturedElement;

use crate::document::{MemoryDocument, NodeId};
use crate::error::LookupError;

#[cfg(test)]
#[path = "xpath_tests.rs"]
mod tests;

const ID_ANCHOR_PREFIX: &str = "//*[@id=\"";
const ID_ANCHOR_SUFFIX: &str = "\"]";

#[derive(Debug, PartialEq, Eq)]
enum Anchor {
    Id(String),
    Document,
}

#[derive(Debug, PartialEq, Eq)]
struct Step {
    tag: String,
    /// 1-based position among same-tag siblings.
    index: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
struct Locator {
    anchor: Anchor,
    steps: Vec<Step>,
}

fn parse(xpath: &str) -> Result<Locator, LookupError> {
    let unresolvable = || LookupError::Unresolvable(xpath.to_string());

    let (anchor, rest) = if let Some(after) = xpath.strip_prefix(ID_ANCHOR_PREFIX) {
        let end = after.find(ID_ANCHOR_SUFFIX).ok_or_else(unresolvable)?;
        let id = &after[..end];
        (
            Anchor::Id(id.to_string()),
            &after[end + ID_ANCHOR_SUFFIX.len()..],
        )
    } else if xpath.starts_with('/') && !xpath.starts_with("//") {
        (Anchor::Document, xpath)
    } else {
        return Err(unresolvable());
    };

    if rest.is_empty() {
        return match anchor {
            Anchor::Id(_) => Ok(Locator {
                anchor,
                steps: Vec::new(),
            }),
            Anchor::Document => Err(unresolvable()),
        };
    }

    let rest = rest.strip_prefix('/').ok_or_else(unresolvable)?;
    let steps = rest
        .split('/')
        .map(|raw| parse_step(raw).ok_or_else(unresolvable))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Locator { anchor, steps })
}

fn parse_step(raw: &str) -> Option<Step> {
    let (tag, index) = match raw.split_once('[') {
        Some((tag, predicate)) => {
            let index: usize = predicate.strip_suffix(']')?.parse().ok()?;
            if index == 0 {
                return None;
            }
            (tag, Some(index))
        }
        None => (raw, None),
    };

    let valid = !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| Step {
        tag: tag.to_lowercase(),
        index,
    })
}

impl MemoryDocument {
    /// Every attached element `xpath` selects.
    pub fn locate_all(&self, xpath: &str) -> Result<Vec<NodeId>, LookupError> {
        let locator = parse(xpath)?;
        let mut steps = locator.steps.iter();

        let mut current = match locator.anchor {
            Anchor::Id(id) => self.elements_with_id(&id),
            Anchor::Document => {
                let Some(first) = steps.next() else {
                    return Ok(Vec::new());
                };
                let roots: Vec<NodeId> = self.root().into_iter().collect();
                self.select(&roots, first)
            }
        };

        for step in steps {
            current = current
                .iter()
                .flat_map(|parent| self.select(&self.children(*parent), step))
                .collect();
        }

        Ok(current)
    }

    /// The single element `xpath` selects.
    pub fn locate(&self, xpath: &str) -> Result<NodeId, LookupError> {
        let matches = self.locate_all(xpath)?;
        match matches.as_slice() {
            [] => Err(LookupError::NotFound(xpath.to_string())),
            [node] => Ok(*node),
            _ => Err(LookupError::Ambiguous {
                locator: xpath.to_string(),
                count: matches.len(),
            }),
        }
    }

    /// Resolve a capture back to a live node.
    ///
    /// Tries the XPath and accepts it only when it matches exactly one
    /// element, then falls back to the captured `id`, which must also be
    /// unique on the page.
    pub fn find_element(&self, capture: &CapturedElement) -> Result<NodeId, LookupError> {
        if let Some(xpath) = capture.xpath.as_deref() {
            match self.locate(xpath) {
                Ok(node) => return Ok(node),
                Err(e) => debug!("XPath lookup failed, trying id: {}", e),
            }
        }

        if !capture.id.is_empty() {
            match self.elements_with_id(&capture.id).as_slice() {
                [] => {}
                [node] => return Ok(*node),
                many => {
                    return Err(LookupError::Ambiguous {
                        locator: format!(
                            "{}{}{}",
                            ID_ANCHOR_PREFIX, capture.id, ID_ANCHOR_SUFFIX
                        ),
                        count: many.len(),
                    });
                }
            }
        }

        Err(LookupError::Unresolvable(capture.summary()))
    }

    fn select(&self, candidates: &[NodeId], step: &Step) -> Vec<NodeId> {
        let same_tag: Vec<NodeId> = candidates
            .iter()
            .copied()
            .filter(|c| self.tag_of(*c).as_deref() == Some(step.tag.as_str()))
            .collect();

        match step.index {
            None => same_tag,
            Some(index) => same_tag.get(index - 1).copied().into_iter().collect(),
        }
    }
}
