//! Item-collection operations.
//!
//! The ordered collections (services, categories, portfolio, promotions,
//! testimonials, about expertises) are addressed by stable record id, never
//! by position. Collections are small, so lookup is a linear scan; a missing
//! id is logged and ignored rather than surfaced as an error.

use crate::path::{set_field, PathError};
use pagecraft_common::item_id;
use pagecraft_document::{
    Expertise, KdpCategory, Project, Promotion, Service, SiteDocument, Testimonial,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Names an id-addressed item collection on the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CollectionKey {
    Services,
    KdpCategories,
    Portfolio,
    Promotions,
    Testimonials,
}

impl CollectionKey {
    /// The camelCase field name, which is also the serialized path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Services => "services",
            CollectionKey::KdpCategories => "kdpCategories",
            CollectionKey::Portfolio => "portfolio",
            CollectionKey::Promotions => "promotions",
            CollectionKey::Testimonials => "testimonials",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            CollectionKey::Services => "svc",
            CollectionKey::KdpCategories => "cat",
            CollectionKey::Portfolio => "prj",
            CollectionKey::Promotions => "prm",
            CollectionKey::Testimonials => "tst",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "services" => Ok(CollectionKey::Services),
            "kdpCategories" => Ok(CollectionKey::KdpCategories),
            "portfolio" => Ok(CollectionKey::Portfolio),
            "promotions" => Ok(CollectionKey::Promotions),
            "testimonials" => Ok(CollectionKey::Testimonials),
            other => Err(format!("unknown collection: {other}")),
        }
    }
}

fn position_of(doc: &SiteDocument, key: CollectionKey, id: &str) -> Option<usize> {
    match key {
        CollectionKey::Services => doc.services.iter().position(|r| r.id == id),
        CollectionKey::KdpCategories => doc.kdp_categories.iter().position(|r| r.id == id),
        CollectionKey::Portfolio => doc.portfolio.iter().position(|r| r.id == id),
        CollectionKey::Promotions => doc.promotions.iter().position(|r| r.id == id),
        CollectionKey::Testimonials => doc.testimonials.iter().position(|r| r.id == id),
    }
}

/// Append a freshly id'd record with type-appropriate defaults. Returns the
/// new record's id.
pub fn add_item(doc: &mut SiteDocument, key: CollectionKey) -> String {
    let id = item_id(key.id_prefix());
    match key {
        CollectionKey::Services => doc.services.push(Service {
            id: id.clone(),
            title: "New Service".to_string(),
            description: "Describe this service.".to_string(),
            icon_name: "Star".to_string(),
            is_hidden: false,
        }),
        CollectionKey::KdpCategories => doc.kdp_categories.push(KdpCategory {
            id: id.clone(),
            title: "New Category".to_string(),
            description: "Describe this category.".to_string(),
            image_url: String::new(),
            is_hidden: false,
        }),
        CollectionKey::Portfolio => doc.portfolio.push(Project {
            id: id.clone(),
            title: "New Project".to_string(),
            book_type: "Paperback".to_string(),
            description: String::new(),
            image_url: String::new(),
            category: "All".to_string(),
            is_hidden: false,
        }),
        CollectionKey::Promotions => doc.promotions.push(Promotion {
            id: id.clone(),
            title: "New Offer".to_string(),
            description: String::new(),
            image_url: String::new(),
            is_hidden: false,
        }),
        CollectionKey::Testimonials => doc.testimonials.push(Testimonial {
            id: id.clone(),
            client_name: "Client Name".to_string(),
            content: String::new(),
            role: String::new(),
            avatar_url: None,
            is_hidden: false,
        }),
    }
    id
}

/// Remove by id. Returns whether a record was removed.
pub fn remove_item(doc: &mut SiteDocument, key: CollectionKey, id: &str) -> bool {
    let Some(idx) = position_of(doc, key, id) else {
        tracing::warn!(collection = key.as_str(), id, "remove_item: id not found");
        return false;
    };
    match key {
        CollectionKey::Services => {
            doc.services.remove(idx);
        }
        CollectionKey::KdpCategories => {
            doc.kdp_categories.remove(idx);
        }
        CollectionKey::Portfolio => {
            doc.portfolio.remove(idx);
        }
        CollectionKey::Promotions => {
            doc.promotions.remove(idx);
        }
        CollectionKey::Testimonials => {
            doc.testimonials.remove(idx);
        }
    }
    true
}

/// Flip a record's `isHidden` flag. Returns whether the record was found.
pub fn toggle_hidden(doc: &mut SiteDocument, key: CollectionKey, id: &str) -> bool {
    let Some(idx) = position_of(doc, key, id) else {
        tracing::warn!(collection = key.as_str(), id, "toggle_hidden: id not found");
        return false;
    };
    match key {
        CollectionKey::Services => {
            doc.services[idx].is_hidden = !doc.services[idx].is_hidden;
        }
        CollectionKey::KdpCategories => {
            doc.kdp_categories[idx].is_hidden = !doc.kdp_categories[idx].is_hidden;
        }
        CollectionKey::Portfolio => {
            doc.portfolio[idx].is_hidden = !doc.portfolio[idx].is_hidden;
        }
        CollectionKey::Promotions => {
            doc.promotions[idx].is_hidden = !doc.promotions[idx].is_hidden;
        }
        CollectionKey::Testimonials => {
            doc.testimonials[idx].is_hidden = !doc.testimonials[idx].is_hidden;
        }
    }
    true
}

/// Set one field on the record matching `id`, going through the field-path
/// mutator once the id is resolved to a position. Returns `Ok(false)` (after
/// logging) when the id is unknown.
pub fn update_item_field(
    doc: &mut SiteDocument,
    key: CollectionKey,
    id: &str,
    field: &str,
    value: Value,
) -> Result<bool, PathError> {
    let Some(idx) = position_of(doc, key, id) else {
        tracing::warn!(collection = key.as_str(), id, field, "update_item_field: id not found");
        return Ok(false);
    };
    let path = format!("{}[{}].{}", key.as_str(), idx, field);
    *doc = set_field(doc, &path, value)?;
    Ok(true)
}

/// Append a new expertise line to the about section. Returns its id.
pub fn add_expertise(doc: &mut SiteDocument, text: impl Into<String>) -> String {
    let id = item_id("exp");
    doc.about.expertises.push(Expertise {
        id: id.clone(),
        text: text.into(),
    });
    id
}

/// Remove an expertise by id. Returns whether it existed.
pub fn remove_expertise(doc: &mut SiteDocument, id: &str) -> bool {
    let before = doc.about.expertises.len();
    doc.about.expertises.retain(|e| e.id != id);
    let removed = doc.about.expertises.len() != before;
    if !removed {
        tracing::warn!(id, "remove_expertise: id not found");
    }
    removed
}

/// Replace an expertise's text by id. Returns whether it was found.
pub fn update_expertise(doc: &mut SiteDocument, id: &str, text: impl Into<String>) -> bool {
    match doc.about.expertises.iter_mut().find(|e| e.id == id) {
        Some(entry) => {
            entry.text = text.into();
            true
        }
        None => {
            tracing::warn!(id, "update_expertise: id not found");
            false
        }
    }
}
