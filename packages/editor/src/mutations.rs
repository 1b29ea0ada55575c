//! # Element-Tree Mutations
//!
//! Id-addressed operations on the custom-section element trees.
//!
//! ## Semantics
//!
//! - Every lookup is a pre-order depth-first search, starting from each
//!   custom-section root in the mapping's insertion order, first match wins.
//! - `MoveElement` is a swap with the adjacent sibling in the same parent;
//!   at the first/last position it is a no-op, not an error.
//! - `RemoveElement` splices the node out of its parent's children; roots
//!   are only removable through `RemoveSection`.
//! - New node ids are minted when the mutation is constructed, so applying
//!   a serialized mutation is deterministic.
//!
//! Callers apply mutations to a clone of the current document and swap the
//! clone in, so earlier snapshots are never mutated in place.

use pagecraft_common::{element_id, section_key};
use pagecraft_document::{
    BuilderElement, ElementType, PropsBag, SiteDocument, StyleBag, StyleKey,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction for a sibling move. Up/left swap with the previous sibling,
/// down/right with the next; the distinction is purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    fn toward_start(&self) -> bool {
        matches!(self, MoveDirection::Up | MoveDirection::Left)
    }
}

/// Caller-supplied overrides for a freshly inserted element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "StyleBag::is_empty")]
    pub style: StyleBag,
    #[serde(default, skip_serializing_if = "PropsBag::is_empty")]
    pub props: PropsBag,
}

/// Semantic tree operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a new element to `parent_id`'s children.
    AddElement {
        parent_id: String,
        element_id: String,
        element_type: ElementType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<ElementSeed>,
    },

    /// Splice the node out of its parent's children.
    RemoveElement { id: String },

    /// Shallow-merge style properties onto the node's style bag.
    UpdateStyle { id: String, patch: StyleBag },

    /// Replace the node's content string (atomic, not a character diff).
    UpdateContent { id: String, content: String },

    /// Shallow-merge onto the node's props.
    UpdateProps { id: String, patch: PropsBag },

    /// Swap with the adjacent sibling; boundary positions are a no-op.
    MoveElement { id: String, direction: MoveDirection },

    /// Insert a scaffolded custom section and append its key to the home
    /// page structure.
    AddSection { key: String },

    /// Delete the section tree and drop its key from the page structure.
    RemoveSection { key: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Section key already exists: {0}")]
    DuplicateSection(String),
}

impl MutationError {
    /// Lookups may legitimately fail under interleaved edits; those cases
    /// are handled as logged no-ops rather than surfaced to the user.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MutationError::NodeNotFound(_)
                | MutationError::ParentNotFound(_)
                | MutationError::SectionNotFound(_)
        )
    }
}

impl Mutation {
    /// Build an `AddElement` with a freshly minted id, returning the id so
    /// the caller can select the new node.
    pub fn add_element(
        parent_id: impl Into<String>,
        element_type: ElementType,
        seed: Option<ElementSeed>,
    ) -> (Self, String) {
        let id = element_id();
        (
            Mutation::AddElement {
                parent_id: parent_id.into(),
                element_id: id.clone(),
                element_type,
                seed,
            },
            id,
        )
    }

    /// Build an `AddSection` with a freshly generated section key.
    pub fn add_section() -> (Self, String) {
        let key = section_key();
        (Mutation::AddSection { key: key.clone() }, key)
    }

    /// Apply the mutation to the document.
    pub fn apply(&self, doc: &mut SiteDocument) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement {
                parent_id,
                element_id,
                element_type,
                seed,
            } => {
                let brand_color = doc.general.brand_color.clone();
                let parent = doc
                    .find_element_mut(parent_id)
                    .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone()))?;
                let node =
                    build_element(element_id, *element_type, seed.as_ref(), brand_color.as_deref());
                parent.children.get_or_insert_with(Vec::new).push(node);
                Ok(())
            }

            Mutation::RemoveElement { id } => {
                for root in doc.custom_sections.values_mut() {
                    if remove_from_children(root, id) {
                        return Ok(());
                    }
                }
                Err(MutationError::NodeNotFound(id.clone()))
            }

            Mutation::UpdateStyle { id, patch } => {
                let node = doc
                    .find_element_mut(id)
                    .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
                node.style.merge(patch);
                Ok(())
            }

            Mutation::UpdateContent { id, content } => {
                let node = doc
                    .find_element_mut(id)
                    .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
                node.content = Some(content.clone());
                Ok(())
            }

            Mutation::UpdateProps { id, patch } => {
                let node = doc
                    .find_element_mut(id)
                    .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;
                for (key, value) in patch {
                    node.props.insert(key.clone(), value.clone());
                }
                Ok(())
            }

            Mutation::MoveElement { id, direction } => {
                for root in doc.custom_sections.values_mut() {
                    if move_within_parent(root, id, *direction) {
                        return Ok(());
                    }
                }
                Err(MutationError::NodeNotFound(id.clone()))
            }

            Mutation::AddSection { key } => {
                if doc.custom_sections.contains_key(key) {
                    return Err(MutationError::DuplicateSection(key.clone()));
                }
                doc.custom_sections
                    .insert(key.clone(), section_scaffold(key));
                doc.page_structure.home.push(key.clone());
                Ok(())
            }

            Mutation::RemoveSection { key } => {
                if doc.custom_sections.shift_remove(key).is_none() {
                    return Err(MutationError::SectionNotFound(key.clone()));
                }
                doc.page_structure.home.retain(|k| k != key);
                Ok(())
            }
        }
    }

    /// Check the mutation against the document without applying it.
    pub fn validate(&self, doc: &SiteDocument) -> Result<(), MutationError> {
        match self {
            Mutation::AddElement { parent_id, .. } => doc
                .find_element(parent_id)
                .map(|_| ())
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.clone())),

            Mutation::RemoveElement { id }
            | Mutation::UpdateStyle { id, .. }
            | Mutation::UpdateContent { id, .. }
            | Mutation::UpdateProps { id, .. }
            | Mutation::MoveElement { id, .. } => doc
                .find_element(id)
                .map(|_| ())
                .ok_or_else(|| MutationError::NodeNotFound(id.clone())),

            Mutation::AddSection { key } => {
                if doc.custom_sections.contains_key(key) {
                    Err(MutationError::DuplicateSection(key.clone()))
                } else {
                    Ok(())
                }
            }

            Mutation::RemoveSection { key } => {
                if doc.custom_sections.contains_key(key) {
                    Ok(())
                } else {
                    Err(MutationError::SectionNotFound(key.clone()))
                }
            }
        }
    }
}

/// Remove `target_id` from the subtree below `el`; returns whether it was
/// found. `el` itself is never removed.
fn remove_from_children(el: &mut BuilderElement, target_id: &str) -> bool {
    let Some(children) = el.children.as_mut() else {
        return false;
    };
    if let Some(pos) = children.iter().position(|c| c.id == target_id) {
        children.remove(pos);
        return true;
    }
    for child in children {
        if remove_from_children(child, target_id) {
            return true;
        }
    }
    false
}

/// Swap `target_id` with its adjacent sibling somewhere below `parent`.
/// Returns whether the node was found (a boundary no-op still counts).
fn move_within_parent(parent: &mut BuilderElement, target_id: &str, direction: MoveDirection) -> bool {
    let Some(children) = parent.children.as_mut() else {
        return false;
    };
    if let Some(idx) = children.iter().position(|c| c.id == target_id) {
        if direction.toward_start() {
            if idx > 0 {
                children.swap(idx, idx - 1);
            }
        } else if idx + 1 < children.len() {
            children.swap(idx, idx + 1);
        }
        return true;
    }
    for child in children {
        if move_within_parent(child, target_id, direction) {
            return true;
        }
    }
    false
}

/// Type-appropriate defaults for a new element, with caller seed layered on
/// top (seed style/props win over the defaults).
fn build_element(
    id: &str,
    element_type: ElementType,
    seed: Option<&ElementSeed>,
    brand_color: Option<&str>,
) -> BuilderElement {
    let mut node = BuilderElement::new(id, element_type);
    node.name = Some(title_case(element_type.as_str()));

    let (style, content): (StyleBag, Option<&str>) = match element_type {
        ElementType::Button => (
            [
                (StyleKey::Padding, "0.75rem 1.5rem".to_string()),
                (
                    StyleKey::BackgroundColor,
                    brand_color.unwrap_or("#000").to_string(),
                ),
                (StyleKey::Color, "#fff".to_string()),
                (StyleKey::BorderRadius, "0.5rem".to_string()),
                (StyleKey::Display, "inline-block".to_string()),
            ]
            .into_iter()
            .collect(),
            Some("Click Me"),
        ),
        ElementType::Heading => (
            [
                (StyleKey::FontSize, "2rem"),
                (StyleKey::FontWeight, "bold"),
                (StyleKey::MarginBottom, "1rem"),
            ]
            .into_iter()
            .collect(),
            Some("New Heading"),
        ),
        ElementType::Text => (
            [
                (StyleKey::FontSize, "1rem"),
                (StyleKey::LineHeight, "1.6"),
                (StyleKey::MarginBottom, "1rem"),
            ]
            .into_iter()
            .collect(),
            Some("Lorem ipsum dolor sit amet, consectetur adipiscing elit."),
        ),
        ElementType::Image => (
            [
                (StyleKey::Width, "100%"),
                (StyleKey::Height, "auto"),
                (StyleKey::BorderRadius, "0.5rem"),
            ]
            .into_iter()
            .collect(),
            Some("https://placehold.co/400x300"),
        ),
        ElementType::Card => (
            [
                (StyleKey::Padding, "2rem"),
                (StyleKey::BackgroundColor, "#f9fafb"),
                (StyleKey::BorderRadius, "1rem"),
                (StyleKey::BoxShadow, "0 4px 6px -1px rgba(0, 0, 0, 0.1)"),
            ]
            .into_iter()
            .collect(),
            None,
        ),
        ElementType::Row => (
            [
                (StyleKey::Display, "flex"),
                (StyleKey::Gap, "1rem"),
                (StyleKey::FlexWrap, "wrap"),
                (StyleKey::Width, "100%"),
            ]
            .into_iter()
            .collect(),
            None,
        ),
        ElementType::Column => (
            [
                (StyleKey::Flex, "1"),
                (StyleKey::MinWidth, "200px"),
                (StyleKey::Display, "flex"),
                (StyleKey::FlexDirection, "column"),
                (StyleKey::Gap, "1rem"),
            ]
            .into_iter()
            .collect(),
            None,
        ),
        _ => (StyleBag::new(), None),
    };

    node.style = style;
    node.content = content.map(str::to_string);

    if let Some(seed) = seed {
        if seed.name.is_some() {
            node.name = seed.name.clone();
        }
        if seed.content.is_some() {
            node.content = seed.content.clone();
        }
        node.style.merge(&seed.style);
        for (key, value) in &seed.props {
            node.props.insert(key.clone(), value.clone());
        }
    }

    node
}

/// Minimal new section: section → container → row → one empty column.
fn section_scaffold(key: &str) -> BuilderElement {
    let column = BuilderElement::new(element_id(), ElementType::Column).with_style(
        [(StyleKey::Flex, "1"), (StyleKey::MinWidth, "300px")]
            .into_iter()
            .collect(),
    );
    let row = BuilderElement::new(element_id(), ElementType::Row)
        .with_style(
            [
                (StyleKey::Display, "flex"),
                (StyleKey::FlexDirection, "row"),
                (StyleKey::Gap, "2rem"),
                (StyleKey::FlexWrap, "wrap"),
            ]
            .into_iter()
            .collect(),
        )
        .with_child(column);
    let container = BuilderElement::new(element_id(), ElementType::Container)
        .with_style(
            [
                (StyleKey::Width, "100%"),
                (StyleKey::MaxWidth, "1200px"),
                (StyleKey::Margin, "0 auto"),
            ]
            .into_iter()
            .collect(),
        )
        .with_child(row);

    BuilderElement::new(key, ElementType::Section)
        .with_name("New Section")
        .with_style(
            [
                (StyleKey::Padding, "4rem 2rem"),
                (StyleKey::BackgroundColor, "#ffffff"),
            ]
            .into_iter()
            .collect(),
        )
        .with_child(container)
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
