//! # Document Store
//!
//! Owns the current document value and the two durable slots.
//!
//! ## Lifecycle
//!
//! ```text
//! open → edit (draft writes) → publish (live write + history) → restore/reset
//! ```
//!
//! Every update overwrites the in-memory document and the draft slot; only a
//! publish touches the live slot and appends a bounded history entry. All
//! durable writes are sanitized first (no inline media in persisted state).
//! A failing durable write degrades gracefully — evict the oldest history
//! entry, retry once, then surface a warning — and never loses the
//! in-memory document.

use crate::capabilities::{Persistence, Slot};
use crate::sanitize::sanitize_media;
use pagecraft_common::{history_id, unix_millis};
use pagecraft_document::SiteDocument;
use serde::{Deserialize, Serialize};

/// Maximum retained history entries; the oldest is evicted beyond this.
pub const HISTORY_CAP: usize = 20;

/// One published snapshot in the history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// Unix milliseconds at publish time.
    pub timestamp: u64,
    pub label: String,
    /// Full serialized document snapshot.
    pub content: String,
}

impl HistoryEntry {
    /// Parse the stored snapshot back into a document.
    pub fn snapshot(&self) -> Result<SiteDocument, serde_json::Error> {
        serde_json::from_str(&self.content)
    }
}

/// Outcome of an update: what reached durable storage, and any degradation
/// the UI should surface as a non-fatal warning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateReport {
    pub draft_persisted: bool,
    pub live_persisted: bool,
    pub history_appended: bool,
    pub warning: Option<String>,
}

/// Holds the single current document; sole writer of persisted state.
pub struct DocumentStore {
    current: SiteDocument,
    backend: Box<dyn Persistence>,
    history_cap: usize,
}

impl DocumentStore {
    /// Open a store over a persistence backend.
    ///
    /// Editing contexts load the last draft (falling back to live, then
    /// defaults); the public site loads live directly. A corrupt snapshot is
    /// skipped with a log line, never a crash.
    pub fn open(backend: Box<dyn Persistence>, editing: bool) -> Self {
        let current = Self::initial_document(backend.as_ref(), editing);
        Self {
            current,
            backend,
            history_cap: HISTORY_CAP,
        }
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    fn initial_document(backend: &dyn Persistence, editing: bool) -> SiteDocument {
        let slots: &[Slot] = if editing {
            &[Slot::Draft, Slot::Live]
        } else {
            &[Slot::Live]
        };
        for slot in slots {
            match backend.fetch(*slot) {
                Ok(Some(doc)) => return doc,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(slot = slot.as_str(), %err, "skipping corrupt snapshot");
                }
            }
        }
        SiteDocument::default()
    }

    pub fn document(&self) -> &SiteDocument {
        &self.current
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.backend.list_history()
    }

    /// Overwrite the in-memory document and the draft slot; when `publish`,
    /// also overwrite the live slot and append a history entry.
    pub fn update(&mut self, doc: SiteDocument, publish: bool) -> UpdateReport {
        self.current = doc;
        let mut report = UpdateReport::default();

        let clean = match sanitize_media(&self.current) {
            Ok(clean) => clean,
            Err(err) => {
                // The in-memory document stays editable either way.
                report.warning = Some(format!("could not prepare snapshot: {err}"));
                return report;
            }
        };

        report.draft_persisted = self.persist_with_recovery(Slot::Draft, &clean, &mut report);

        if publish {
            report.live_persisted = self.persist_with_recovery(Slot::Live, &clean, &mut report);
            if report.live_persisted {
                report.history_appended = self.append_history_entry(&clean, &mut report);
                self.enforce_history_cap();
            }
        }

        report
    }

    /// Replace current + draft with a history snapshot. Live and the history
    /// log are untouched. Returns whether the restore happened.
    pub fn restore(&mut self, history_entry_id: &str) -> bool {
        let Some(entry) = self
            .backend
            .list_history()
            .into_iter()
            .find(|e| e.id == history_entry_id)
        else {
            tracing::warn!(history_entry_id, "restore: no such history entry");
            return false;
        };
        match entry.snapshot() {
            Ok(doc) => {
                self.current = doc.clone();
                let mut report = UpdateReport::default();
                self.persist_with_recovery(Slot::Draft, &doc, &mut report);
                if let Some(warning) = report.warning {
                    tracing::warn!(warning, "restore: draft write degraded");
                }
                true
            }
            Err(err) => {
                tracing::warn!(history_entry_id, %err, "restore: malformed snapshot skipped");
                false
            }
        }
    }

    /// Throw away the draft: reload the last-published document (or the
    /// defaults if nothing was ever published) into current + draft slot in
    /// one step. Live and history are untouched.
    pub fn discard_draft(&mut self) {
        let doc = match self.backend.fetch(Slot::Live) {
            Ok(Some(doc)) => doc,
            Ok(None) => SiteDocument::default(),
            Err(err) => {
                tracing::warn!(%err, "discard: live snapshot unreadable, using defaults");
                SiteDocument::default()
            }
        };
        self.current = doc.clone();
        let mut report = UpdateReport::default();
        self.persist_with_recovery(Slot::Draft, &doc, &mut report);
        if let Some(warning) = report.warning {
            tracing::warn!(warning, "discard: draft write degraded");
        }
    }

    /// Clear draft, live and history and reinitialize to defaults.
    ///
    /// Irreversible; callers are expected to have gone through an explicit
    /// confirmation step first.
    pub fn reset(&mut self) {
        if let Err(err) = self.backend.clear() {
            tracing::warn!(%err, "reset: backend clear failed");
        }
        self.current = SiteDocument::default();
    }

    fn persist_with_recovery(
        &mut self,
        slot: Slot,
        doc: &SiteDocument,
        report: &mut UpdateReport,
    ) -> bool {
        match self.backend.persist(slot, doc) {
            Ok(()) => true,
            Err(first) => {
                tracing::warn!(slot = slot.as_str(), %first, "persist failed, evicting history and retrying");
                self.evict_oldest_history();
                match self.backend.persist(slot, doc) {
                    Ok(()) => true,
                    Err(second) => {
                        report.warning = Some(format!(
                            "changes are kept in memory but could not be saved ({second})"
                        ));
                        false
                    }
                }
            }
        }
    }

    fn append_history_entry(&mut self, doc: &SiteDocument, report: &mut UpdateReport) -> bool {
        let content = match serde_json::to_string(doc) {
            Ok(content) => content,
            Err(err) => {
                report.warning = Some(format!("history snapshot skipped: {err}"));
                return false;
            }
        };
        let entry = HistoryEntry {
            id: history_id(),
            timestamp: unix_millis(),
            label: "Publish".to_string(),
            content,
        };
        match self.backend.append_history(&entry) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "history append dropped");
                false
            }
        }
    }

    fn evict_oldest_history(&mut self) {
        let entries = self.backend.list_history();
        if let Some(oldest) = entries.first() {
            self.backend.remove_history(&oldest.id.clone());
        }
    }

    fn enforce_history_cap(&mut self) {
        let mut entries = self.backend.list_history();
        while entries.len() > self.history_cap {
            let oldest = entries.remove(0);
            self.backend.remove_history(&oldest.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::MemoryPersistence;

    fn store() -> DocumentStore {
        DocumentStore::open(Box::new(MemoryPersistence::new()), true)
    }

    #[test]
    fn test_open_empty_backend_uses_defaults() {
        let store = store();
        assert_eq!(store.document(), &SiteDocument::default());
    }

    #[test]
    fn test_draft_update_leaves_live_alone() {
        let mut store = store();
        let mut doc = store.document().clone();
        doc.general.name = "Draft Name".to_string();

        let report = store.update(doc, false);
        assert!(report.draft_persisted);
        assert!(!report.live_persisted);
        assert_eq!(store.history().len(), 0);

        // A non-editing reader still sees nothing published.
        // (Live slot was never written, so it falls back to defaults.)
        assert_eq!(store.document().general.name, "Draft Name");
    }

    #[test]
    fn test_publish_writes_live_and_history() {
        let mut store = store();
        let mut doc = store.document().clone();
        doc.general.name = "Published".to_string();

        let report = store.update(doc, true);
        assert!(report.live_persisted);
        assert!(report.history_appended);
        assert_eq!(store.history().len(), 1);
        assert!(report.warning.is_none());
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut store = store().with_history_cap(3);
        for i in 0..5 {
            let mut doc = store.document().clone();
            doc.general.name = format!("v{i}");
            store.update(doc, true);
        }
        let history = store.history();
        assert_eq!(history.len(), 3);
        // Oldest snapshots (v0, v1) were evicted.
        let first: SiteDocument = history[0].snapshot().unwrap();
        assert_eq!(first.general.name, "v2");
    }

    #[test]
    fn test_corrupt_draft_falls_back_to_live_then_defaults() {
        let mut backend = MemoryPersistence::new();
        backend.seed_raw(Slot::Draft, "{broken");
        let store = DocumentStore::open(Box::new(backend), true);
        assert_eq!(store.document(), &SiteDocument::default());
    }
}
