//! The root content document.
//!
//! `SiteDocument` is the single serializable aggregate the whole system
//! edits, renders and persists. Item collections carry stable ids assigned
//! at creation; `page_structure.home` is the sole source of section
//! ordering; `custom_sections` maps section keys to builder element trees
//! and takes rendering precedence over built-in sections of the same key.

use crate::element::BuilderElement;
use crate::style::{SectionStyle, TypographyStyle};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn is_false(v: &bool) -> bool {
    !*v
}

/// Editing privilege of the current admin user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Editor,
    Viewer,
}

impl AdminRole {
    pub fn can_mutate(&self) -> bool {
        !matches!(self, AdminRole::Viewer)
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, AdminRole::SuperAdmin)
    }
}

/// Shape applied to call-to-action buttons site-wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    Rounded,
    Square,
    Pill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    pub id: String,
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterColumn {
    pub id: String,
    pub title: String,
    pub links: Vec<NavLink>,
}

/// Flat branding/contact record. One level deep by design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct General {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_greeting: Option<String>,
    pub title: String,
    pub description: String,
    pub hero_image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about_image: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiverr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_cta_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_style: Option<ButtonShape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderLayout {
    Standard,
    Centered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderConfig {
    pub sticky: bool,
    pub layout: HeaderLayout,
    pub menu_items: Vec<NavLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterConfig {
    pub columns: Vec<FooterColumn>,
    pub copyright: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_html: Option<String>,
    pub show_socials: bool,
}

/// Closed set of named typography presets plus the two font families.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub hero_title: TypographyStyle,
    pub hero_subtitle: TypographyStyle,
    pub section_title: TypographyStyle,
    pub section_subtitle: TypographyStyle,
    pub body_text: TypographyStyle,
    pub font_family_heading: String,
    pub font_family_body: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    pub title: String,
    pub subtitle: String,
}

/// Biography plus the id-addressed expertise list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub content: String,
    pub expertises: Vec<Expertise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expertise {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KdpCategory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub book_type: String,
    pub description: String,
    pub image_url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub client_name: String,
    pub content: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    Text,
    Email,
    Textarea,
    Tel,
    Select,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FormFieldType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub fields: Vec<FormField>,
    pub submit_button_text: String,
    pub success_message: String,
    pub enable_spam_protection: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seo {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advanced {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_html: Option<String>,
    pub seo: Seo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    pub role: AdminRole,
    pub is_draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_published_at: Option<u64>,
}

/// Ordered section keys per page. `home` is the only page today.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    pub home: Vec<String>,
}

/// The root aggregate. See the crate docs for the layering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDocument {
    pub general: General,
    pub header: HeaderConfig,
    pub footer: FooterConfig,
    pub typography: Typography,
    pub section_headers: IndexMap<String, SectionHeader>,
    pub section_styles: IndexMap<String, SectionStyle>,
    pub about: About,
    pub services: Vec<Service>,
    pub kdp_categories: Vec<KdpCategory>,
    pub portfolio: Vec<Project>,
    pub promotions: Vec<Promotion>,
    pub testimonials: Vec<Testimonial>,
    pub enabled_sections: IndexMap<String, bool>,
    pub page_structure: PageStructure,
    pub custom_sections: IndexMap<String, BuilderElement>,
    pub contact_form: ContactForm,
    pub advanced: Advanced,
    pub admin_settings: AdminSettings,
}

impl SiteDocument {
    /// Find a builder element by id across all custom-section roots.
    ///
    /// Roots are visited in the mapping's insertion order, each subtree
    /// pre-order; the first match wins.
    pub fn find_element(&self, id: &str) -> Option<&BuilderElement> {
        self.custom_sections.values().find_map(|root| root.find(id))
    }

    pub fn find_element_mut(&mut self, id: &str) -> Option<&mut BuilderElement> {
        self.custom_sections
            .values_mut()
            .find_map(|root| root.find_mut(id))
    }

    /// All builder element ids in the document, traversal order.
    pub fn element_ids(&self) -> Vec<String> {
        let mut out = Vec::new();
        for root in self.custom_sections.values() {
            root.collect_ids(&mut out);
        }
        out
    }

    /// Whether a section key is enabled (missing key counts as enabled).
    pub fn section_enabled(&self, key: &str) -> bool {
        self.enabled_sections.get(key).copied().unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_json_round_trip() {
        let doc = SiteDocument::default();
        let json = serde_json::to_string(&doc).unwrap();
        let back: SiteDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let doc = SiteDocument::default();
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("pageStructure").is_some());
        assert!(value.get("customSections").is_some());
        assert!(value.get("sectionHeaders").is_some());
    }

    #[test]
    fn test_missing_section_key_counts_as_enabled() {
        let doc = SiteDocument::default();
        assert!(doc.section_enabled("not-a-section"));
    }

    #[test]
    fn test_role_privileges() {
        assert!(AdminRole::SuperAdmin.can_delete());
        assert!(!AdminRole::Editor.can_delete());
        assert!(AdminRole::Editor.can_mutate());
        assert!(!AdminRole::Viewer.can_mutate());
    }
}
