//! # Field-Path Mutator
//!
//! Dot/bracket paths address leaves of the structured (non-tree) document:
//! `general.brandColor`, `services[2].title`, `about.expertises[0].text`.
//!
//! `set_field` goes through a JSON value round-trip, so the returned
//! document is a full deep copy sharing nothing with the input — the
//! previous snapshot stays immutable for history and discard-changes.
//! Paths must resolve to existing containers; this is a leaf-replacement
//! mechanism, never a way to grow new structure (that is what the
//! item-collection and tree operations are for).

use pagecraft_document::SiteDocument;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    #[error("Invalid path syntax: {0}")]
    Syntax(String),

    #[error("Path does not resolve: {0}")]
    Unresolved(String),

    #[error("Value rejected at {path}: {reason}")]
    InvalidValue { path: String, reason: String },
}

/// One step of a parsed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Parse `a.b[2].c` into segments. Bracket indices may follow any key and
/// may stack (`grid[1][2]`).
pub fn parse_path(path: &str) -> Result<Vec<PathSegment>, PathError> {
    if path.is_empty() {
        return Err(PathError::Syntax("empty path".to_string()));
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        if part.is_empty() {
            return Err(PathError::Syntax(format!("empty segment in '{path}'")));
        }
        let mut rest = part;
        let key_end = rest.find('[').unwrap_or(rest.len());
        let key = &rest[..key_end];
        if !key.is_empty() {
            segments.push(PathSegment::Key(key.to_string()));
        } else if key_end == 0 && !part.starts_with('[') {
            return Err(PathError::Syntax(format!("bad segment '{part}'")));
        }
        rest = &rest[key_end..];
        while let Some(stripped) = rest.strip_prefix('[') {
            let close = stripped
                .find(']')
                .ok_or_else(|| PathError::Syntax(format!("unclosed '[' in '{path}'")))?;
            let idx: usize = stripped[..close]
                .parse()
                .map_err(|_| PathError::Syntax(format!("bad index in '{path}'")))?;
            segments.push(PathSegment::Index(idx));
            rest = &stripped[close + 1..];
        }
        if !rest.is_empty() {
            return Err(PathError::Syntax(format!("trailing '{rest}' in '{path}'")));
        }
    }
    Ok(segments)
}

fn descend<'a>(value: &'a Value, segment: &PathSegment, path: &str) -> Result<&'a Value, PathError> {
    match segment {
        PathSegment::Key(key) => value
            .as_object()
            .and_then(|map| map.get(key))
            .ok_or_else(|| PathError::Unresolved(path.to_string())),
        PathSegment::Index(idx) => value
            .as_array()
            .and_then(|arr| arr.get(*idx))
            .ok_or_else(|| PathError::Unresolved(path.to_string())),
    }
}

/// Read the leaf a path addresses.
pub fn get_field(doc: &SiteDocument, path: &str) -> Result<Value, PathError> {
    let segments = parse_path(path)?;
    let root = serde_json::to_value(doc).map_err(|e| PathError::InvalidValue {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let mut cursor = &root;
    for segment in &segments {
        cursor = descend(cursor, segment, path)?;
    }
    Ok(cursor.clone())
}

/// Replace the leaf a path addresses, returning a new deep-copied document.
///
/// Every intermediate segment must resolve to an existing container; a final
/// array index must be in bounds. Setting an object key that the schema
/// models as optional-and-absent is allowed (that is still a leaf, not
/// structure); a key the schema does not model at all is rejected as
/// unresolved.
pub fn set_field(doc: &SiteDocument, path: &str, value: Value) -> Result<SiteDocument, PathError> {
    let segments = parse_path(path)?;
    let mut root = serde_json::to_value(doc).map_err(|e| PathError::InvalidValue {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let wrote_null = value.is_null();
    let mut inserted_new_key = false;

    {
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| PathError::Syntax(path.to_string()))?;

        let mut cursor = &mut root;
        for segment in parents {
            cursor = match segment {
                PathSegment::Key(key) => cursor
                    .as_object_mut()
                    .and_then(|map| map.get_mut(key))
                    .ok_or_else(|| PathError::Unresolved(path.to_string()))?,
                PathSegment::Index(idx) => cursor
                    .as_array_mut()
                    .and_then(|arr| arr.get_mut(*idx))
                    .ok_or_else(|| PathError::Unresolved(path.to_string()))?,
            };
        }

        match last {
            PathSegment::Key(key) => {
                let map = cursor
                    .as_object_mut()
                    .ok_or_else(|| PathError::Unresolved(path.to_string()))?;
                inserted_new_key = !map.contains_key(key);
                map.insert(key.clone(), value);
            }
            PathSegment::Index(idx) => {
                let arr = cursor
                    .as_array_mut()
                    .ok_or_else(|| PathError::Unresolved(path.to_string()))?;
                let slot = arr
                    .get_mut(*idx)
                    .ok_or_else(|| PathError::Unresolved(path.to_string()))?;
                *slot = value;
            }
        }
    }

    let updated: SiteDocument = serde_json::from_value(root).map_err(|e| PathError::InvalidValue {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    // A key the schema does not model is silently dropped on the round-trip.
    // When the write inserted a key that did not survive, report that rather
    // than claiming success. Open maps (section headers, enabled flags,
    // element props) and modeled optionals keep their inserts, so the check
    // only fires for genuinely unknown struct fields.
    if inserted_new_key && !wrote_null && get_field(&updated, path).is_err() {
        return Err(PathError::Unresolved(path.to_string()));
    }

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_dot_and_bracket() {
        let segments = parse_path("services[2].title").unwrap();
        assert_eq!(
            segments,
            vec![
                PathSegment::Key("services".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("title".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_path("").is_err());
        assert!(parse_path("a..b").is_err());
        assert!(parse_path("a[x]").is_err());
        assert!(parse_path("a[1").is_err());
    }

    #[test]
    fn test_get_set_round_trip_is_identity() {
        let doc = SiteDocument::default();
        for path in [
            "general.brandColor",
            "services[0].title",
            "about.expertises[0].text",
            "pageStructure.home",
            "typography.heroTitle.fontSize",
        ] {
            let current = get_field(&doc, path).unwrap();
            let updated = set_field(&doc, path, current).unwrap();
            assert_eq!(updated, doc, "setting {path} to itself changed the doc");
        }
    }

    #[test]
    fn test_set_replaces_only_addressed_leaf() {
        let doc = SiteDocument::default();
        let updated = set_field(&doc, "services[0].title", json!("Rebranded")).unwrap();

        assert_eq!(updated.services[0].title, "Rebranded");
        assert_eq!(updated.services[0].description, doc.services[0].description);
        assert_eq!(updated.services[1..], doc.services[1..]);
        assert_eq!(updated.general, doc.general);
    }

    #[test]
    fn test_set_fails_on_missing_container() {
        let doc = SiteDocument::default();
        assert!(matches!(
            set_field(&doc, "general.nested.thing", json!(1)),
            Err(PathError::Unresolved(_))
        ));
        assert!(matches!(
            set_field(&doc, "services[99].title", json!("x")),
            Err(PathError::Unresolved(_))
        ));
    }

    #[test]
    fn test_set_rejects_unknown_struct_field() {
        let doc = SiteDocument::default();
        assert!(matches!(
            set_field(&doc, "general.bogusField", json!("x")),
            Err(PathError::Unresolved(_))
        ));
        assert!(matches!(
            set_field(&doc, "services[0].nickname", json!("x")),
            Err(PathError::Unresolved(_))
        ));
        // Open maps still accept new keys.
        let updated = set_field(&doc, "enabledSections.custom-77", json!(false)).unwrap();
        assert_eq!(updated.enabled_sections.get("custom-77"), Some(&false));
    }

    #[test]
    fn test_set_optional_absent_leaf() {
        let mut doc = SiteDocument::default();
        doc.general.phone = None;
        let updated = set_field(&doc, "general.phone", json!("+1 555 0100")).unwrap();
        assert_eq!(updated.general.phone.as_deref(), Some("+1 555 0100"));
    }

    #[test]
    fn test_set_does_not_alias_input() {
        let doc = SiteDocument::default();
        let updated = set_field(&doc, "general.name", json!("Other")).unwrap();
        assert_eq!(doc.general.name, SiteDocument::default().general.name);
        assert_ne!(updated.general.name, doc.general.name);
    }
}
