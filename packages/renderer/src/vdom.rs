//! Virtual DOM node

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of the rendered tree. Attribute and style maps keep insertion
/// order so output is deterministic for a given document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        styles: IndexMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Comment node
    Comment { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: IndexMap::new(),
            styles: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn comment(content: impl Into<String>) -> Self {
        VNode::Comment {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Push a child only when present. Keeps composition code flat.
    pub fn with_opt_child(self, child: Option<VNode>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            _ => None,
        }
    }

    /// Child slice, empty for text and comment nodes.
    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Concatenated text content of this subtree.
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Comment { .. } => String::new(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }

    /// Depth-first search for the first element matching a predicate.
    pub fn find_element<'a>(&'a self, pred: &dyn Fn(&VNode) -> bool) -> Option<&'a VNode> {
        if matches!(self, VNode::Element { .. }) && pred(self) {
            return Some(self);
        }
        for child in self.children() {
            if let Some(found) = child.find_element(pred) {
                return Some(found);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let node = VNode::element("div")
            .with_attr("id", "hero")
            .with_style("color", "#fff")
            .with_child(VNode::text("hello"));

        assert_eq!(node.tag(), Some("div"));
        assert_eq!(node.attr("id"), Some("hero"));
        assert_eq!(node.style("color"), Some("#fff"));
        assert_eq!(node.text_content(), "hello");
    }

    #[test]
    fn test_attr_order_is_stable() {
        let node = VNode::element("a")
            .with_attr("href", "#")
            .with_attr("rel", "noopener")
            .with_attr("class", "btn");

        let VNode::Element { attributes, .. } = &node else {
            panic!("expected element");
        };
        let keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["href", "rel", "class"]);
    }

    #[test]
    fn test_find_element() {
        let tree = VNode::element("div")
            .with_child(VNode::element("span").with_attr("data-x", "1"))
            .with_child(VNode::element("span").with_attr("data-x", "2"));

        let hit = tree
            .find_element(&|n| n.attr("data-x") == Some("2"))
            .unwrap();
        assert_eq!(hit.tag(), Some("span"));
    }

    #[test]
    fn test_serde_tagged_representation() {
        let node = VNode::text("hi");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Text");
        assert_eq!(json["content"], "hi");
    }
}
