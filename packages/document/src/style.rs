//! Presentation style types.
//!
//! The builder's per-element style bag is a typed key → value map: a closed
//! set of recognized presentation properties plus a passthrough bucket for
//! keys we don't model yet. Values stay raw CSS strings.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Recognized presentation properties for builder elements.
///
/// Keys serialize under their camelCase names (the document wire format);
/// [`StyleKey::css_name`] gives the kebab-case CSS property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleKey {
    BackgroundColor,
    BackgroundImage,
    Color,
    Padding,
    PaddingTop,
    PaddingBottom,
    PaddingLeft,
    PaddingRight,
    Margin,
    MarginTop,
    MarginBottom,
    MarginLeft,
    MarginRight,
    Width,
    MaxWidth,
    MinWidth,
    Height,
    MinHeight,
    BorderRadius,
    Border,
    BorderTop,
    BorderBottom,
    BorderLeft,
    BorderRight,
    BoxShadow,
    TextAlign,
    FontSize,
    FontWeight,
    LineHeight,
    Display,
    FlexDirection,
    AlignItems,
    JustifyContent,
    Gap,
    GridTemplateColumns,
    FlexWrap,
    Flex,
    /// Unrecognized property, kept verbatim for forward compatibility.
    Custom(String),
}

impl StyleKey {
    pub fn as_str(&self) -> &str {
        match self {
            StyleKey::BackgroundColor => "backgroundColor",
            StyleKey::BackgroundImage => "backgroundImage",
            StyleKey::Color => "color",
            StyleKey::Padding => "padding",
            StyleKey::PaddingTop => "paddingTop",
            StyleKey::PaddingBottom => "paddingBottom",
            StyleKey::PaddingLeft => "paddingLeft",
            StyleKey::PaddingRight => "paddingRight",
            StyleKey::Margin => "margin",
            StyleKey::MarginTop => "marginTop",
            StyleKey::MarginBottom => "marginBottom",
            StyleKey::MarginLeft => "marginLeft",
            StyleKey::MarginRight => "marginRight",
            StyleKey::Width => "width",
            StyleKey::MaxWidth => "maxWidth",
            StyleKey::MinWidth => "minWidth",
            StyleKey::Height => "height",
            StyleKey::MinHeight => "minHeight",
            StyleKey::BorderRadius => "borderRadius",
            StyleKey::Border => "border",
            StyleKey::BorderTop => "borderTop",
            StyleKey::BorderBottom => "borderBottom",
            StyleKey::BorderLeft => "borderLeft",
            StyleKey::BorderRight => "borderRight",
            StyleKey::BoxShadow => "boxShadow",
            StyleKey::TextAlign => "textAlign",
            StyleKey::FontSize => "fontSize",
            StyleKey::FontWeight => "fontWeight",
            StyleKey::LineHeight => "lineHeight",
            StyleKey::Display => "display",
            StyleKey::FlexDirection => "flexDirection",
            StyleKey::AlignItems => "alignItems",
            StyleKey::JustifyContent => "justifyContent",
            StyleKey::Gap => "gap",
            StyleKey::GridTemplateColumns => "gridTemplateColumns",
            StyleKey::FlexWrap => "flexWrap",
            StyleKey::Flex => "flex",
            StyleKey::Custom(name) => name,
        }
    }

    /// Kebab-case CSS property name for rendering.
    pub fn css_name(&self) -> String {
        let mut out = String::with_capacity(self.as_str().len() + 4);
        for ch in self.as_str().chars() {
            if ch.is_ascii_uppercase() {
                out.push('-');
                out.push(ch.to_ascii_lowercase());
            } else {
                out.push(ch);
            }
        }
        out
    }
}

impl From<&str> for StyleKey {
    fn from(s: &str) -> Self {
        const KNOWN: &[StyleKey] = &[
            StyleKey::BackgroundColor,
            StyleKey::BackgroundImage,
            StyleKey::Color,
            StyleKey::Padding,
            StyleKey::PaddingTop,
            StyleKey::PaddingBottom,
            StyleKey::PaddingLeft,
            StyleKey::PaddingRight,
            StyleKey::Margin,
            StyleKey::MarginTop,
            StyleKey::MarginBottom,
            StyleKey::MarginLeft,
            StyleKey::MarginRight,
            StyleKey::Width,
            StyleKey::MaxWidth,
            StyleKey::MinWidth,
            StyleKey::Height,
            StyleKey::MinHeight,
            StyleKey::BorderRadius,
            StyleKey::Border,
            StyleKey::BorderTop,
            StyleKey::BorderBottom,
            StyleKey::BorderLeft,
            StyleKey::BorderRight,
            StyleKey::BoxShadow,
            StyleKey::TextAlign,
            StyleKey::FontSize,
            StyleKey::FontWeight,
            StyleKey::LineHeight,
            StyleKey::Display,
            StyleKey::FlexDirection,
            StyleKey::AlignItems,
            StyleKey::JustifyContent,
            StyleKey::Gap,
            StyleKey::GridTemplateColumns,
            StyleKey::FlexWrap,
            StyleKey::Flex,
        ];
        for key in KNOWN {
            if key.as_str() == s {
                return key.clone();
            }
        }
        StyleKey::Custom(s.to_string())
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StyleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StyleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(StyleKey::from(s.as_str()))
    }
}

/// Ordered property bag attached to every builder element.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StyleBag(pub IndexMap<StyleKey, String>);

impl StyleBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StyleKey) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: StyleKey, value: impl Into<String>) -> &mut Self {
        self.0.insert(key, value.into());
        self
    }

    /// Shallow-merge `patch` onto this bag; patch entries win.
    pub fn merge(&mut self, patch: &StyleBag) {
        for (key, value) in &patch.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StyleKey, &String)> {
        self.0.iter()
    }
}

impl<K: Into<StyleKey>, V: Into<String>> FromIterator<(K, V)> for StyleBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StyleBag(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Horizontal text alignment for typography presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// Unit used for section padding values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpacingUnit {
    Px,
    Rem,
    Vh,
}

/// Padding and background of a built-in page section.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStyle {
    pub padding_top: u32,
    pub padding_bottom: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dark: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing_unit: Option<SpacingUnit>,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            padding_top: 80,
            padding_bottom: 80,
            background_color: None,
            is_dark: None,
            spacing_unit: None,
        }
    }
}

/// One named typography preset (hero title, body text, ...).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyStyle {
    pub font_size: f32,
    pub font_weight: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    pub letter_spacing: f32,
    pub line_height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_key_round_trip() {
        let key = StyleKey::from("backgroundColor");
        assert_eq!(key, StyleKey::BackgroundColor);
        assert_eq!(key.as_str(), "backgroundColor");
        assert_eq!(key.css_name(), "background-color");
    }

    #[test]
    fn test_unknown_key_passes_through() {
        let key = StyleKey::from("filter");
        assert_eq!(key, StyleKey::Custom("filter".to_string()));
        assert_eq!(key.as_str(), "filter");
    }

    #[test]
    fn test_merge_is_shallow_and_patch_wins() {
        let mut bag: StyleBag = [("padding", "1rem"), ("color", "#111")].into_iter().collect();
        let patch: StyleBag = [("color", "#fff"), ("gap", "2rem")].into_iter().collect();
        bag.merge(&patch);

        assert_eq!(bag.get(&StyleKey::Padding), Some("1rem"));
        assert_eq!(bag.get(&StyleKey::Color), Some("#fff"));
        assert_eq!(bag.get(&StyleKey::Gap), Some("2rem"));
    }

    #[test]
    fn test_style_bag_serializes_as_plain_object() {
        let bag: StyleBag = [("backgroundColor", "#fff")].into_iter().collect();
        let json = serde_json::to_string(&bag).unwrap();
        assert_eq!(json, r##"{"backgroundColor":"#fff"}"##);

        let back: StyleBag = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bag);
    }
}
