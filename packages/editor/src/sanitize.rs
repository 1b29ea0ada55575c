//! Media sanitizer for durable writes.
//!
//! Policy: persisted state never contains inline media encodings. Any string
//! field starting with `data:` or `blob:` is replaced with an empty string
//! before a durable write; images must resolve to externally hosted URLs.
//! The pass is idempotent — an empty string is not inline media.

use pagecraft_document::SiteDocument;
use serde_json::Value;

fn is_inline_media(s: &str) -> bool {
    s.starts_with("data:") || s.starts_with("blob:")
}

fn scrub(value: &mut Value) {
    match value {
        Value::String(s) => {
            if is_inline_media(s) {
                s.clear();
            }
        }
        Value::Array(items) => {
            for item in items {
                scrub(item);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                scrub(item);
            }
        }
        _ => {}
    }
}

/// Produce a copy of the document with all inline media stripped.
///
/// Only string leaves change, so the scrubbed value always deserializes back
/// into a valid document; a failure here means the input itself did not
/// round-trip and is reported as-is.
pub fn sanitize_media(doc: &SiteDocument) -> Result<SiteDocument, serde_json::Error> {
    let mut value = serde_json::to_value(doc)?;
    scrub(&mut value);
    serde_json::from_value(value)
}
