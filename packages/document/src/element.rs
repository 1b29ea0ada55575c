//! The builder element tree.
//!
//! Custom page sections are recursive trees of [`BuilderElement`] nodes.
//! A node's id is assigned at creation and never changes; a node appears in
//! exactly one place in the tree, so "move" is always remove-then-reinsert.

use crate::style::StyleBag;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Closed set of builder node types. The type is immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Section,
    Container,
    Row,
    Column,
    Text,
    Heading,
    Image,
    Button,
    Icon,
    Card,
    Divider,
    Spacer,
}

impl ElementType {
    /// Container types hold an ordered child list; leaf types never do.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            ElementType::Section
                | ElementType::Container
                | ElementType::Row
                | ElementType::Column
                | ElementType::Card
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Section => "section",
            ElementType::Container => "container",
            ElementType::Row => "row",
            ElementType::Column => "column",
            ElementType::Text => "text",
            ElementType::Heading => "heading",
            ElementType::Image => "image",
            ElementType::Button => "button",
            ElementType::Icon => "icon",
            ElementType::Card => "card",
            ElementType::Divider => "divider",
            ElementType::Spacer => "spacer",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open record of type-specific metadata (heading level, link href, ...).
pub type PropsBag = IndexMap<String, Value>;

/// One node in a custom-section tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderElement {
    pub id: String,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Display name in the layer tree.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Text content, or the image URL for image nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "StyleBag::is_empty")]
    pub style: StyleBag,
    #[serde(default, skip_serializing_if = "PropsBag::is_empty")]
    pub props: PropsBag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BuilderElement>>,
}

impl BuilderElement {
    pub fn new(id: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            id: id.into(),
            element_type,
            name: None,
            content: None,
            style: StyleBag::new(),
            props: PropsBag::new(),
            children: if element_type.is_container() {
                Some(Vec::new())
            } else {
                None
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_style(mut self, style: StyleBag) -> Self {
        self.style = style;
        self
    }

    pub fn with_child(mut self, child: BuilderElement) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Child slice, empty for leaves.
    pub fn children(&self) -> &[BuilderElement] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Pre-order depth-first search, first match wins.
    pub fn find(&self, id: &str) -> Option<&BuilderElement> {
        if self.id == id {
            return Some(self);
        }
        for child in self.children() {
            if let Some(found) = child.find(id) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut BuilderElement> {
        if self.id == id {
            return Some(self);
        }
        for child in self.children.as_deref_mut().unwrap_or(&mut []) {
            if let Some(found) = child.find_mut(id) {
                return Some(found);
            }
        }
        None
    }

    /// All node ids in this subtree, pre-order.
    pub fn collect_ids(&self, out: &mut Vec<String>) {
        out.push(self.id.clone());
        for child in self.children() {
            child.collect_ids(out);
        }
    }

    /// Number of nodes in this subtree (including self).
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(BuilderElement::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> BuilderElement {
        BuilderElement::new("a", ElementType::Section).with_child(
            BuilderElement::new("b", ElementType::Container)
                .with_child(BuilderElement::new("c", ElementType::Text).with_content("hi")),
        )
    }

    #[test]
    fn test_find_nested() {
        let root = tree();
        assert_eq!(root.find("c").unwrap().content.as_deref(), Some("hi"));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn test_leaf_has_no_children_array() {
        let text = BuilderElement::new("t", ElementType::Text);
        assert!(text.children.is_none());
        assert!(text.children().is_empty());

        let section = BuilderElement::new("s", ElementType::Section);
        assert_eq!(section.children, Some(vec![]));
    }

    #[test]
    fn test_serde_round_trip_preserves_depth() {
        let root = tree();
        let json = serde_json::to_string(&root).unwrap();
        let back: BuilderElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
        assert_eq!(back.node_count(), 3);
    }

    #[test]
    fn test_type_serializes_lowercase() {
        let json = serde_json::to_value(ElementType::Heading).unwrap();
        assert_eq!(json, serde_json::json!("heading"));
    }
}
