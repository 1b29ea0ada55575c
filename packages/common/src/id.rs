//! Identifier generation for elements, items and sections.
//!
//! Ids are derived from the unix-millisecond clock plus a process-wide
//! counter, so two ids minted in the same millisecond still differ. Ids are
//! assigned once at creation and never reused after deletion.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Current unix time in milliseconds.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn next_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Fresh id for a builder element: `el_<millis>_<n>`.
pub fn element_id() -> String {
    format!("el_{}_{}", unix_millis(), next_suffix())
}

/// Fresh id for an item-collection record: `<prefix>_<millis>_<n>`.
pub fn item_id(prefix: &str) -> String {
    format!("{}_{}_{}", prefix, unix_millis(), next_suffix())
}

/// Fresh key for a custom section: `custom-<millis>-<n>`.
pub fn section_key() -> String {
    format!("custom-{}-{}", unix_millis(), next_suffix())
}

/// Fresh id for a history entry.
pub fn history_id() -> String {
    format!("hist_{}_{}", unix_millis(), next_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_unique_within_one_millisecond() {
        let ids: HashSet<String> = (0..1000).map(|_| element_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_id_prefixes() {
        assert!(element_id().starts_with("el_"));
        assert!(item_id("svc").starts_with("svc_"));
        assert!(section_key().starts_with("custom-"));
    }
}
